//! The command table: code-to-operation descriptors and argument
//! preparation.
//!
//! Dispatch is a closed enum rather than a name lookup: each command kind
//! knows how to turn the raw decoded integers into the prepared argument
//! type its board operation takes.

use std::collections::HashMap;
use std::fmt;

use log::warn;
use thiserror::Error;

use crate::draw::color::{Color, ColorError};
use crate::draw::pen::PenState;
use crate::draw::plane::Point;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("attempted to register {second} under code {code:#04x}, which is already registered by {first}")]
    DuplicateCommandCode {
        code: u8,
        first: CommandKind,
        second: CommandKind,
    },

    #[error("{kind} expects {expected} argument(s), received {received}")]
    BadArgumentCount {
        kind: CommandKind,
        expected: usize,
        received: usize,
    },

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// The operations the board knows how to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Clear,
    SetPenState,
    SetColour,
    MovePen,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandKind::Clear => "Clear",
            CommandKind::SetPenState => "SetPenState",
            CommandKind::SetColour => "SetColour",
            CommandKind::MovePen => "MovePen",
        };
        f.write_str(name)
    }
}

/// A board operation with its arguments fully prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    Clear,
    SetPenState(PenState),
    SetColour(Color),
    MovePen(Vec<Point>),
}

impl CommandKind {
    /// Map the raw decoded integers onto this command's argument type.
    ///
    /// Wrong argument shapes are fatal, except for an odd-length move list,
    /// where the trailing value is dropped with a warning.
    pub fn prepare(&self, args: &[i64]) -> Result<BoardCommand, CommandError> {
        match self {
            CommandKind::Clear => {
                self.expect_args(args, 0)?;
                Ok(BoardCommand::Clear)
            }
            CommandKind::SetPenState => {
                self.expect_args(args, 1)?;
                let state = if args[0] == 0 {
                    PenState::Up
                } else {
                    PenState::Down
                };
                Ok(BoardCommand::SetPenState(state))
            }
            CommandKind::SetColour => Ok(BoardCommand::SetColour(Color::from_channels(args)?)),
            CommandKind::MovePen => {
                if args.len() % 2 != 0 {
                    warn!("arguments passed to {} are of odd length: {:?}", self, args);
                }

                let points = args
                    .chunks_exact(2)
                    .map(|pair| Point::new(pair[0], pair[1]))
                    .collect();
                Ok(BoardCommand::MovePen(points))
            }
        }
    }

    fn expect_args(&self, args: &[i64], expected: usize) -> Result<(), CommandError> {
        if args.len() != expected {
            return Err(CommandError::BadArgumentCount {
                kind: *self,
                expected,
                received: args.len(),
            });
        }
        Ok(())
    }
}

/// One entry of the command table: a one-byte code and the operation it
/// invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub code: u8,
    pub kind: CommandKind,
}

impl CommandDescriptor {
    pub const fn new(code: u8, kind: CommandKind) -> Self {
        CommandDescriptor { code, kind }
    }
}

/// The fixed default command set.
pub const DEFAULT_COMMANDS: [CommandDescriptor; 4] = [
    CommandDescriptor::new(0xF0, CommandKind::Clear),
    CommandDescriptor::new(0x80, CommandKind::SetPenState),
    CommandDescriptor::new(0xA0, CommandKind::SetColour),
    CommandDescriptor::new(0xC0, CommandKind::MovePen),
];

/// Mapping from command codes to operations, built once at startup.
#[derive(Debug, Clone)]
pub struct CommandTable {
    entries: HashMap<u8, CommandKind>,
}

impl CommandTable {
    /// Register a set of descriptors. Two descriptors sharing a code fail
    /// here, at construction, not at dispatch time.
    pub fn new(descriptors: &[CommandDescriptor]) -> Result<Self, CommandError> {
        let mut entries = HashMap::with_capacity(descriptors.len());

        for descriptor in descriptors {
            if let Some(first) = entries.insert(descriptor.code, descriptor.kind) {
                return Err(CommandError::DuplicateCommandCode {
                    code: descriptor.code,
                    first,
                    second: descriptor.kind,
                });
            }
        }

        Ok(CommandTable { entries })
    }

    pub fn lookup(&self, code: u8) -> Option<CommandKind> {
        self.entries.get(&code).copied()
    }
}

impl Default for CommandTable {
    /// The default table. The codes in [`DEFAULT_COMMANDS`] are distinct, so
    /// registration cannot fail.
    fn default() -> Self {
        let entries = DEFAULT_COMMANDS
            .iter()
            .map(|descriptor| (descriptor.code, descriptor.kind))
            .collect();
        CommandTable { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_registers_fixed_codes() {
        let table = CommandTable::default();

        assert_eq!(table.lookup(0xF0), Some(CommandKind::Clear));
        assert_eq!(table.lookup(0x80), Some(CommandKind::SetPenState));
        assert_eq!(table.lookup(0xA0), Some(CommandKind::SetColour));
        assert_eq!(table.lookup(0xC0), Some(CommandKind::MovePen));
        assert_eq!(table.lookup(0x90), None);
    }

    #[test]
    fn duplicate_codes_fail_registration() {
        let descriptors = [
            CommandDescriptor::new(0x80, CommandKind::Clear),
            CommandDescriptor::new(0x80, CommandKind::MovePen),
        ];

        let err = CommandTable::new(&descriptors).unwrap_err();
        assert_eq!(
            err,
            CommandError::DuplicateCommandCode {
                code: 0x80,
                first: CommandKind::Clear,
                second: CommandKind::MovePen,
            }
        );

        // Registration order does not matter.
        let reversed = [
            CommandDescriptor::new(0x80, CommandKind::MovePen),
            CommandDescriptor::new(0x80, CommandKind::Clear),
        ];
        assert!(CommandTable::new(&reversed).is_err());
    }

    #[test]
    fn prepare_clear_takes_no_args() {
        assert_eq!(CommandKind::Clear.prepare(&[]), Ok(BoardCommand::Clear));
        assert_eq!(
            CommandKind::Clear.prepare(&[1]),
            Err(CommandError::BadArgumentCount {
                kind: CommandKind::Clear,
                expected: 0,
                received: 1,
            })
        );
    }

    #[test]
    fn prepare_pen_state_flag() {
        assert_eq!(
            CommandKind::SetPenState.prepare(&[0]),
            Ok(BoardCommand::SetPenState(PenState::Up))
        );
        assert_eq!(
            CommandKind::SetPenState.prepare(&[1]),
            Ok(BoardCommand::SetPenState(PenState::Down))
        );
        assert_eq!(
            CommandKind::SetPenState.prepare(&[-3]),
            Ok(BoardCommand::SetPenState(PenState::Down))
        );
        assert!(CommandKind::SetPenState.prepare(&[]).is_err());
        assert!(CommandKind::SetPenState.prepare(&[0, 1]).is_err());
    }

    #[test]
    fn prepare_colour_validates_channels() {
        assert_eq!(
            CommandKind::SetColour.prepare(&[0, 255, 0, 255]),
            Ok(BoardCommand::SetColour(Color::new(0, 255, 0, 255)))
        );
        assert!(CommandKind::SetColour.prepare(&[0, 255, 0]).is_err());
        assert!(CommandKind::SetColour.prepare(&[0, 256, 0, 255]).is_err());
    }

    #[test]
    fn prepare_move_pen_pairs_points() {
        let args = [255, 255, 255, 255, 88, 97, 98, 99, 99, 99];
        let expected = vec![
            Point::new(255, 255),
            Point::new(255, 255),
            Point::new(88, 97),
            Point::new(98, 99),
            Point::new(99, 99),
        ];

        assert_eq!(
            CommandKind::MovePen.prepare(&args),
            Ok(BoardCommand::MovePen(expected))
        );
    }

    #[test]
    fn prepare_move_pen_drops_odd_trailing_value() {
        let args = [255, 255, 255, 255, 88, 97, 98, 99, 99];
        let expected = vec![
            Point::new(255, 255),
            Point::new(255, 255),
            Point::new(88, 97),
            Point::new(98, 99),
        ];

        assert_eq!(
            CommandKind::MovePen.prepare(&args),
            Ok(BoardCommand::MovePen(expected))
        );
    }
}
