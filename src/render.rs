use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;
use wgpu;

// Uniforms read by the grid fragment shader
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderParams {
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_px: f32, // cell edge in physical pixels (logical size * scale factor)
    pub _padding: u32, // Ensure 16-byte alignment
}

impl RenderParams {
    pub fn new(grid_width: usize, grid_height: usize, cell_size: u32, scale_factor: f64) -> Self {
        Self {
            grid_width: grid_width as u32,
            grid_height: grid_height as u32,
            cell_px: (cell_size as f64 * scale_factor) as f32,
            _padding: 0,
        }
    }
}

pub fn create_render_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Render Bind Group Layout"),
        entries: &[
            // RenderParams Uniform (Binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<RenderParams>() as u64),
                },
                count: None,
            },
            // Grid snapshot (Binding 1)
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    })
}

pub fn create_render_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    render_param_buffer: &wgpu::Buffer,
    cell_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Render Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: render_param_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: cell_buffer.as_entire_binding() },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_are_sixteen_bytes() {
        assert_eq!(std::mem::size_of::<RenderParams>(), 16);
    }

    #[test]
    fn cell_size_scales_with_display() {
        let params = RenderParams::new(40, 30, 20, 1.5);
        assert_eq!(params.cell_px, 30.0);
        assert_eq!(bytemuck::bytes_of(&params).len(), 16);
    }
}
