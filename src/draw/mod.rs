//! The drawing surface: plane geometry, pen, color, and the board state
//! machine that emits plotter commands.

pub mod board;
pub mod color;
pub mod pen;
pub mod plane;

pub use board::Board;
pub use color::{Color, ColorError};
pub use pen::{Pen, PenState};
pub use plane::{Axis, Boundary, Intercept, Plane, Point};
