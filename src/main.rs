// Declare modules directly in the binary crate root
pub mod clock;
pub mod config;
pub mod controller;
pub mod grid;
pub mod input;
pub mod layout;
pub mod persistence;
pub mod render;
pub mod rules;
pub mod simulation;
pub mod state;

use crate::config::Config;
use crate::controller::{Flow, UiEvent};
use crate::input::Pointer;
use crate::layout::Layout;
use crate::simulation::Simulation;
use crate::state::State;

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

async fn run(
    event_loop: EventLoop<()>,
    window: Arc<Window>,
    layout: Layout,
    mut sim: Simulation,
) -> Result<(), Box<dyn Error>> {
    let mut state = State::new(window, layout.clone(), &sim).await?;
    let mut pointer = Pointer::default();
    let started = Instant::now();

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { window_id, ref event }
                if window_id == state.window.id() =>
            {
                // egui only paints here, but it still needs to see input for its own bookkeeping
                let _ = state.egui_winit_state.on_window_event(&state.window, event);

                match event {
                    WindowEvent::CloseRequested => {
                        if controller::handle_event(&mut sim, &layout, UiEvent::Quit) == Flow::Exit {
                            window_target.exit();
                        }
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                    }
                    WindowEvent::ScaleFactorChanged { .. } => {
                        let size = state.window.inner_size();
                        state.resize(size);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input::handle_cursor_move(&mut pointer, *position, state.window.scale_factor());
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut pointer);
                    }
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        if let Some(ui_event) = input::handle_mouse_input(&pointer, *button, *element_state) {
                            controller::handle_event(&mut sim, &layout, ui_event);
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        // Drawn after every mutation of this iteration has been applied.
                        match state.render(&sim) {
                            Ok(()) => {}
                            Err(wgpu::SurfaceError::OutOfMemory) => {
                                log::error!("Out of GPU memory, exiting");
                                window_target.exit();
                            }
                            Err(e) => {
                                log::warn!("Skipping frame due to surface {:?}", e);
                            }
                        }
                    }
                    _ => (),
                }
            }
            Event::AboutToWait => {
                // All events of this iteration are in; now let the clock decide.
                sim.advance(started.elapsed());
                state.window.request_redraw();
            }
            _ => (),
        }
    })?;

    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = try_main() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let config = Config::default();
    config.validate()?;

    let layout = Layout::new(&config);
    let sim = Simulation::startup(&config, &mut rand::rng())?;

    let event_loop = EventLoop::new()?;
    let (width, height) = layout.window_size();
    let window = Arc::new(
        winit::window::WindowBuilder::new()
            .with_title("Game of Life")
            .with_inner_size(winit::dpi::LogicalSize::new(width as f64, height as f64))
            .with_resizable(false)
            .build(&event_loop)?,
    );

    pollster::block_on(run(event_loop, window, layout, sim))
}
