//! The drawing board: a bounded plane plus the pen movement state machine.
//!
//! The board turns prepared commands into plotter-language lines on its
//! output sink. Every line is written and flushed immediately, so partial
//! output stays valid if a later command fails.
//!
//! Pen movement is where the clipping rules live:
//! - pen up: all deltas collapse into one destination and one `MV` line,
//!   clamped to the furthest boundary intercept when the destination leaves
//!   the board;
//! - pen down: deltas are walked one at a time, in-bounds waypoints are
//!   buffered into grouped `MV` lines, and every boundary crossing emits its
//!   intercept and a pen lift/lower so drawing resumes past the edge.

use std::io::{self, Write};

use crate::commands::BoardCommand;
use crate::draw::color::Color;
use crate::draw::pen::{Pen, PenState};
use crate::draw::plane::{Intercept, Plane, Point};

/// A plane with a pen on it, writing plotter commands to `sink`.
#[derive(Debug)]
pub struct Board<W: Write> {
    plane: Plane,
    pen: Pen,
    current: Point,
    last: Point,
    sink: W,
}

impl<W: Write> Board<W> {
    pub fn new(plane: Plane, sink: W) -> Self {
        Board {
            plane,
            pen: Pen::new(),
            current: Point::ORIGIN,
            last: Point::ORIGIN,
            sink,
        }
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    /// The pen's true position, which may be out of bounds even though the
    /// emitted moves are clamped to the board edge.
    pub fn current_location(&self) -> Point {
        self.current
    }

    /// Dispatch one prepared command.
    pub fn apply(&mut self, command: BoardCommand) -> io::Result<()> {
        match command {
            BoardCommand::Clear => self.clear(),
            BoardCommand::SetPenState(state) => self.set_pen_state(state),
            BoardCommand::SetColour(color) => self.set_colour(color),
            BoardCommand::MovePen(deltas) => self.move_pen(&deltas),
        }
    }

    /// Reset the pen and move it back to the origin. Emits `CLR;`.
    pub fn clear(&mut self) -> io::Result<()> {
        self.pen.reset();
        self.current = Point::ORIGIN;
        self.write_line("CLR;")
    }

    /// Lift or lower the pen. Emits `PEN UP;` / `PEN DOWN;`.
    pub fn set_pen_state(&mut self, state: PenState) -> io::Result<()> {
        match state {
            PenState::Up => {
                self.pen.lift();
                self.write_line("PEN UP;")
            }
            PenState::Down => {
                self.pen.lower();
                self.write_line("PEN DOWN;")
            }
        }
    }

    /// Change the pen color. Emits `CO r g b a;`.
    pub fn set_colour(&mut self, color: Color) -> io::Result<()> {
        self.pen.set_color(color);
        self.write_line(&format!("CO {};", color))
    }

    /// Move the pen by each relative delta in turn.
    pub fn move_pen(&mut self, deltas: &[Point]) -> io::Result<()> {
        if self.pen.is_down() {
            self.draw(deltas)
        } else {
            self.move_to_final_destination(deltas)
        }
    }

    /// Pen-up movement: one `MV` line for the accumulated destination.
    ///
    /// If the final segment crosses the board edge and the destination is out
    /// of bounds, the emitted position is clamped to the furthest intercept.
    /// The internal position keeps the true destination either way.
    fn move_to_final_destination(&mut self, deltas: &[Point]) -> io::Result<()> {
        for &delta in deltas {
            self.last = self.current;
            self.current = self.current + delta;
        }

        let intercepts = self.plane.boundary_intercepts(self.last, self.current);

        let destination = match intercepts.last() {
            Some(furthest) if !self.plane.contains(self.current) => furthest.point,
            _ => self.current,
        };

        self.write_line(&format!("MV {};", destination))
    }

    /// Pen-down movement: draw each delta, clipping at the board edge.
    fn draw(&mut self, deltas: &[Point]) -> io::Result<()> {
        let mut buffer: Vec<Point> = Vec::new();

        for &delta in deltas {
            self.last = self.current;
            self.current = self.current + delta;

            let intercepts = self.plane.boundary_intercepts(self.last, self.current);

            if !intercepts.is_empty() {
                // Close out the visited waypoints at the first crossing, then
                // toggle the pen around each crossing in chronological order.
                buffer.push(intercepts[0].point);
                self.flush_moves(&mut buffer)?;
                self.cross_boundaries(&intercepts)?;
            }

            if self.pen.is_down() && self.plane.contains(self.current) {
                buffer.push(self.current);
            }
        }

        self.flush_moves(&mut buffer)
    }

    /// Emit pen transitions (and `MV` lines past the first intercept) for a
    /// set of crossings already sorted by distance.
    ///
    /// The pen is lowered when it was lifted at an earlier crossing and the
    /// segment re-enters the board; otherwise the crossing leaves the board
    /// and the pen is lifted.
    fn cross_boundaries(&mut self, intercepts: &[Intercept]) -> io::Result<()> {
        for (index, intercept) in intercepts.iter().enumerate() {
            if index > 0 {
                self.write_line(&format!("MV {};", intercept.point))?;
            }

            if !self.pen.is_down() && !self.plane.contains(self.last) {
                self.set_pen_state(PenState::Down)?;
            } else {
                self.set_pen_state(PenState::Up)?;
            }
        }

        Ok(())
    }

    /// Drain the waypoint buffer into a single grouped `MV` line. An empty
    /// buffer produces no output.
    fn flush_moves(&mut self, buffer: &mut Vec<Point>) -> io::Result<()> {
        if buffer.is_empty() {
            return Ok(());
        }

        let mut line = String::from("MV");
        for point in buffer.drain(..) {
            line.push(' ');
            line.push_str(&point.to_string());
        }
        line.push(';');

        self.write_line(&line)
    }

    /// Give up the output sink, e.g. to inspect what was written.
    pub fn into_sink(self) -> W {
        self.sink
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.sink, "{}", line)?;
        self.sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board<Vec<u8>> {
        Board::new(Plane::default(), Vec::new())
    }

    fn output(board: &Board<Vec<u8>>) -> String {
        String::from_utf8(board.sink.clone()).unwrap()
    }

    #[test]
    fn clear_emits_clr() {
        let mut board = board();
        board.clear().unwrap();
        assert_eq!(output(&board), "CLR;\n");
    }

    #[test]
    fn clear_resets_any_prior_state() {
        let mut board = board();
        board.set_pen_state(PenState::Down).unwrap();
        board.set_colour(Color::new(9, 9, 9, 9)).unwrap();
        board.move_pen(&[Point::new(10, 10)]).unwrap();

        board.clear().unwrap();

        assert_eq!(board.current_location(), Point::ORIGIN);
        assert!(!board.pen().is_down());
        assert_eq!(board.pen().color(), Color::default());
        assert!(output(&board).ends_with("CLR;\n"));
    }

    #[test]
    fn pen_state_transitions() {
        let mut board = board();
        board.set_pen_state(PenState::Up).unwrap();
        assert!(!board.pen().is_down());

        board.set_pen_state(PenState::Down).unwrap();
        assert!(board.pen().is_down());

        assert_eq!(output(&board), "PEN UP;\nPEN DOWN;\n");
    }

    #[test]
    fn set_colour_emits_channels() {
        let mut board = board();
        board.set_colour(Color::new(1, 2, 3, 4)).unwrap();

        assert_eq!(board.pen().color(), Color::new(1, 2, 3, 4));
        assert_eq!(output(&board), "CO 1 2 3 4;\n");
    }

    #[test]
    fn move_pen_up_accumulates_deltas() {
        let mut board = board();
        board
            .move_pen(&[Point::new(10, 10), Point::new(5, -5)])
            .unwrap();

        assert_eq!(board.current_location(), Point::new(15, 5));
        assert_eq!(output(&board), "MV (15, 5);\n");
    }

    #[test]
    fn move_pen_up_out_of_bounds_clamps_output() {
        let mut board = board();
        board
            .move_pen(&[Point::new(10, 10), Point::new(50_000, 0)])
            .unwrap();

        // The emitted move is clamped to the edge; the true position is not.
        assert_eq!(board.current_location(), Point::new(50_010, 10));
        assert_eq!(output(&board), "MV (8191, 10);\n");
    }

    #[test]
    fn move_pen_down_groups_waypoints() {
        let mut board = board();
        board.pen.lower();
        board
            .move_pen(&[Point::new(10, 10), Point::new(5, -5)])
            .unwrap();

        assert_eq!(board.current_location(), Point::new(15, 5));
        assert_eq!(output(&board), "MV (10, 10) (15, 5);\n");
    }

    #[test]
    fn move_pen_down_out_of_bounds_lifts_and_resumes() {
        let mut board = board();
        board.pen.lower();
        board
            .move_pen(&[
                Point::new(5000, 5000),
                Point::new(5000, 0),
                Point::new(-5000, 0),
                Point::new(-200, 0),
            ])
            .unwrap();

        assert_eq!(board.current_location(), Point::new(4800, 5000));
        assert_eq!(
            output(&board),
            "MV (5000, 5000) (8191, 5000);\n\
             PEN UP;\n\
             MV (8191, 5000);\n\
             PEN DOWN;\n\
             MV (5000, 5000) (4800, 5000);\n"
        );
    }

    #[test]
    fn move_pen_down_empty_deltas_is_silent() {
        let mut board = board();
        board.pen.lower();
        board.move_pen(&[]).unwrap();
        assert_eq!(output(&board), "");
    }

    #[test]
    fn move_pen_down_ending_on_boundary_emits_edge_point() {
        // A segment that crosses the edge diagonally clips to a boundary-
        // exact point, which is valid output even though it fails the strict
        // within-bounds test.
        let mut board = board();
        board.pen.lower();
        board.move_pen(&[Point::new(9000, 0)]).unwrap();

        assert_eq!(output(&board), "MV (8191, 0);\nPEN UP;\n");
        assert_eq!(board.current_location(), Point::new(9000, 0));
    }

    #[test]
    fn apply_dispatches_commands() {
        let mut board = board();
        board.apply(BoardCommand::Clear).unwrap();
        board
            .apply(BoardCommand::SetColour(Color::new(0, 255, 0, 255)))
            .unwrap();
        board
            .apply(BoardCommand::MovePen(vec![Point::new(0, 0)]))
            .unwrap();
        board.apply(BoardCommand::SetPenState(PenState::Down)).unwrap();

        assert_eq!(
            output(&board),
            "CLR;\nCO 0 255 0 255;\nMV (0, 0);\nPEN DOWN;\n"
        );
    }
}
