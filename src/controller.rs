//! Translates UI events into simulation operations.
//!
//! Every handler runs to completion, file I/O included, before the caller
//! delivers the next event.

use crate::layout::{Button, Layout};
use crate::simulation::Simulation;

/// Raw events from the input collaborator. Positions are logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    Quit,
    MouseDown { x: f64, y: f64 },
}

/// A click resolved against the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Pixel position inside the grid area.
    ClickCell { x: f64, y: f64 },
    ClickPauseButton,
    ClickSaveButton,
    ClickLoadButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Button hit-testing runs first, so a click never reaches both a button and a cell.
pub fn classify(layout: &Layout, x: f64, y: f64) -> Option<ControlEvent> {
    if let Some(button) = layout.button_at(x, y) {
        return Some(match button {
            Button::Pause => ControlEvent::ClickPauseButton,
            Button::Save => ControlEvent::ClickSaveButton,
            Button::Load => ControlEvent::ClickLoadButton,
        });
    }
    if layout.grid_rect().contains(x, y) {
        return Some(ControlEvent::ClickCell { x, y });
    }
    None
}

pub fn handle_event(sim: &mut Simulation, layout: &Layout, event: UiEvent) -> Flow {
    match event {
        UiEvent::Quit => {
            log::info!("Quit requested");
            Flow::Exit
        }
        UiEvent::MouseDown { x, y } => {
            match classify(layout, x, y) {
                Some(control) => apply(sim, layout, control),
                None => log::debug!("Click at ({x:.0}, {y:.0}) hit nothing"),
            }
            Flow::Continue
        }
    }
}

pub fn apply(sim: &mut Simulation, layout: &Layout, event: ControlEvent) {
    match event {
        ControlEvent::ClickCell { x, y } => {
            // The grid rectangle's far edge is inclusive for hit-testing but
            // not a cell, so it maps to None here.
            let Some((cx, cy)) = layout.cell_at(x, y) else {
                return;
            };
            match sim.grid.toggle(cx, cy) {
                Ok(state) => log::debug!("Toggled ({cx}, {cy}) to {state:?}"),
                Err(e) => log::warn!("Ignoring click: {e}"),
            }
        }
        ControlEvent::ClickPauseButton => {
            let state = sim.clock.toggle_pause();
            log::info!("Simulation {:?}", state);
        }
        ControlEvent::ClickSaveButton => {
            // Failures are logged and reported through `sim.status`.
            let _ = sim.save();
        }
        ControlEvent::ClickLoadButton => {
            let _ = sim.load();
        }
    }
}
