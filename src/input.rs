use crate::controller::UiEvent;
use winit::{
    dpi::{LogicalPosition, PhysicalPosition},
    event::{ElementState, MouseButton},
};

/// Tracks the cursor so button presses, which winit reports without a
/// position, can be turned into positioned clicks.
#[derive(Debug, Default)]
pub struct Pointer {
    pub cursor_pos: Option<LogicalPosition<f64>>,
}

pub fn handle_cursor_move(pointer: &mut Pointer, position: PhysicalPosition<f64>, scale_factor: f64) {
    pointer.cursor_pos = Some(position.to_logical(scale_factor));
}

pub fn handle_cursor_left(pointer: &mut Pointer) {
    pointer.cursor_pos = None;
}

/// Left-button presses over the window become `MouseDown` events.
pub fn handle_mouse_input(pointer: &Pointer, button: MouseButton, element_state: ElementState) -> Option<UiEvent> {
    if button != MouseButton::Left || element_state != ElementState::Pressed {
        return None;
    }
    pointer.cursor_pos.map(|pos| UiEvent::MouseDown { x: pos.x, y: pos.y })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_without_cursor_is_ignored() {
        let pointer = Pointer::default();
        assert_eq!(handle_mouse_input(&pointer, MouseButton::Left, ElementState::Pressed), None);
    }

    #[test]
    fn press_uses_logical_position() {
        let mut pointer = Pointer::default();
        handle_cursor_move(&mut pointer, PhysicalPosition::new(90.0, 50.0), 2.0);
        assert_eq!(
            handle_mouse_input(&pointer, MouseButton::Left, ElementState::Pressed),
            Some(UiEvent::MouseDown { x: 45.0, y: 25.0 })
        );
    }

    #[test]
    fn release_and_other_buttons_are_ignored() {
        let mut pointer = Pointer::default();
        handle_cursor_move(&mut pointer, PhysicalPosition::new(10.0, 10.0), 1.0);
        assert_eq!(handle_mouse_input(&pointer, MouseButton::Left, ElementState::Released), None);
        assert_eq!(handle_mouse_input(&pointer, MouseButton::Right, ElementState::Pressed), None);
    }

    #[test]
    fn leaving_the_window_forgets_the_cursor() {
        let mut pointer = Pointer::default();
        handle_cursor_move(&mut pointer, PhysicalPosition::new(10.0, 10.0), 1.0);
        handle_cursor_left(&mut pointer);
        assert_eq!(handle_mouse_input(&pointer, MouseButton::Left, ElementState::Pressed), None);
    }
}
