//! Fixed window geometry: the grid area on top, a button bar underneath.
//!
//! All coordinates are logical pixels with the origin at the top-left corner.

use crate::config::Config;

pub const BUTTON_WIDTH: u32 = 200;
pub const BUTTON_HEIGHT: u32 = 50;
/// Gap between the grid area and the top of the buttons.
pub const BUTTON_MARGIN: u32 = 10;
const PAUSE_X: u32 = 50;
const SAVE_X: u32 = 300;
const LOAD_X: u32 = 550;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Edges are inclusive.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        self.x <= px && px <= self.x + self.w && self.y <= py && py <= self.y + self.h
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.w
            && other.x <= self.x + self.w
            && self.y <= other.y + other.h
            && other.y <= self.y + self.h
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Pause,
    Save,
    Load,
}

impl Button {
    pub const ALL: [Button; 3] = [Button::Pause, Button::Save, Button::Load];
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub cell_size: u32,
    pub grid_width: usize,
    pub grid_height: usize,
    pub button_bar_height: u32,
}

impl Layout {
    pub fn new(config: &Config) -> Self {
        Self {
            cell_size: config.cell_size,
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            button_bar_height: config.button_bar_height,
        }
    }

    /// Width and height of the grid area in pixels.
    pub fn grid_pixels(&self) -> (u32, u32) {
        (
            self.grid_width as u32 * self.cell_size,
            self.grid_height as u32 * self.cell_size,
        )
    }

    /// Logical window size: grid area plus the button bar.
    pub fn window_size(&self) -> (u32, u32) {
        let (w, h) = self.grid_pixels();
        (w.max(LOAD_X + BUTTON_WIDTH), h + self.button_bar_height)
    }

    pub fn grid_rect(&self) -> Rect {
        let (w, h) = self.grid_pixels();
        Rect {
            x: 0.0,
            y: 0.0,
            w: w as f64,
            h: h as f64,
        }
    }

    pub fn button_rect(&self, button: Button) -> Rect {
        let x = match button {
            Button::Pause => PAUSE_X,
            Button::Save => SAVE_X,
            Button::Load => LOAD_X,
        };
        let (_, grid_h) = self.grid_pixels();
        Rect {
            x: x as f64,
            y: (grid_h + BUTTON_MARGIN) as f64,
            w: BUTTON_WIDTH as f64,
            h: BUTTON_HEIGHT as f64,
        }
    }

    pub fn button_at(&self, px: f64, py: f64) -> Option<Button> {
        Button::ALL
            .into_iter()
            .find(|&b| self.button_rect(b).contains(px, py))
    }

    /// Pixel position to cell coordinates, or `None` outside the grid area.
    pub fn cell_at(&self, px: f64, py: f64) -> Option<(usize, usize)> {
        let (w, h) = self.grid_pixels();
        if px < 0.0 || py < 0.0 || px >= w as f64 || py >= h as f64 {
            return None;
        }
        let x = px as u32 / self.cell_size;
        let y = py as u32 / self.cell_size;
        Some((x as usize, y as usize))
    }
}
