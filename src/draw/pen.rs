//! Pen state: up/down plus the current drawing color.

use crate::draw::color::Color;

/// Whether the pen is touching the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenState {
    Up,
    Down,
}

/// The drawing pen.
///
/// Defaults are fresh values per instance; there is no shared default color
/// object to alias.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pen {
    color: Color,
    down: bool,
}

impl Pen {
    pub fn new() -> Self {
        Pen::default()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn lift(&mut self) {
        self.down = false;
    }

    pub fn lower(&mut self) {
        self.down = true;
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Lift the pen and restore the default color.
    pub fn reset(&mut self) {
        *self = Pen::default();
    }
}
