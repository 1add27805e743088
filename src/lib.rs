//! Hexplot
//!
//! Turns a stream of hex-encoded drawing-command bytes into a textual
//! plotter command language (`CLR;`, `PEN UP;`, `PEN DOWN;`, `CO r g b a;`,
//! `MV (x, y) ...;`) on a bounded drawing surface.
//!
//! - `reader`: token cursor over the hex character stream
//! - `codec`: argument decoding (the 16-bit/14-bit wire format)
//! - `commands`: command table and argument preparation
//! - `draw`: plane geometry, pen, color, and the board state machine
//! - `processor`: the decode loop tying it all together
//!
//! The interesting parts are the boundary-clipping geometry in
//! [`draw::plane`] and the pen movement state machine in [`draw::board`],
//! which together decide where a motion segment meets the board edge and how
//! the pen lifts, clamps, and resumes around it.

pub mod codec;
pub mod commands;
pub mod draw;
pub mod processor;
pub mod reader;

pub use codec::{Decode, Sixteen14Codec};
pub use commands::{BoardCommand, CommandDescriptor, CommandKind, CommandTable};
pub use draw::{Axis, Board, Color, Pen, PenState, Plane, Point};
pub use processor::{ProcessError, StreamProcessor};
pub use reader::TokenSource;
