//! The decode loop: pulls tokens, classifies command vs. argument bytes,
//! collects and decodes arguments, and invokes board operations.

use std::io::{self, Read, Write};

use log::warn;
use thiserror::Error;

use crate::codec::{CodecError, Decode};
use crate::commands::{CommandError, CommandTable};
use crate::draw::board::Board;
use crate::reader::{Token, TokenSource};

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("expected a single unsigned hex byte (0-255), received {0:?}")]
    InvalidByte(String),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Drives a [`TokenSource`] and executes the board operations its command
/// bytes name.
///
/// Unrecognized command bytes are logged and skipped; everything else that
/// goes wrong mid-run aborts and propagates to the caller.
#[derive(Debug)]
pub struct StreamProcessor<R: Read, D: Decode, W: Write> {
    source: TokenSource<R>,
    codec: D,
    board: Board<W>,
    commands: CommandTable,
}

impl<R: Read, D: Decode, W: Write> StreamProcessor<R, D, W> {
    pub fn new(source: TokenSource<R>, codec: D, board: Board<W>, commands: CommandTable) -> Self {
        StreamProcessor {
            source,
            codec,
            board,
            commands,
        }
    }

    /// Process the stream to the end. Reaching end of input is the one clean
    /// way out.
    pub fn run(&mut self) -> Result<(), ProcessError> {
        loop {
            // Argument collection looks one command byte ahead and leaves it
            // buffered as the source's current token; reuse it rather than
            // pulling twice.
            let token = match self.source.current() {
                Some(token) => token,
                None => match self.source.advance()? {
                    Some(token) => token,
                    None => break,
                },
            };

            let Some(code) = command_code(token)? else {
                self.source.advance()?;
                continue;
            };

            match self.commands.lookup(code) {
                None => {
                    warn!("received unrecognized command byte {:#04x}", code);
                    self.source.advance()?;
                }
                Some(kind) => {
                    let args = self.collect_args()?;
                    let command = kind.prepare(&args)?;
                    self.board.apply(command)?;
                }
            }
        }

        Ok(())
    }

    /// Pull and decode argument tokens until the next command byte (left
    /// buffered for the main loop) or end of input. Tokens are decoded in
    /// pairs; a dangling half-pair carries no value and is discarded.
    fn collect_args(&mut self) -> Result<Vec<i64>, ProcessError> {
        let mut args = Vec::new();
        let mut pending: Option<Token> = None;

        while let Some(token) = self.source.advance()? {
            if command_code(token)?.is_some() {
                break;
            }

            match pending.take() {
                None => pending = Some(token),
                Some(first) => {
                    let joined = format!("{}{}", first.text(), token.text());
                    args.push(self.codec.decode(&joined)?);
                }
            }
        }

        Ok(args)
    }

    pub fn into_board(self) -> Board<W> {
        self.board
    }
}

/// Classify a token: `Some(code)` for a command byte (top bit set), `None`
/// for argument bytes and whitespace padding. A token that is neither blank
/// nor a hex byte is a fatal decoding error.
fn command_code(token: Token) -> Result<Option<u8>, ProcessError> {
    if token.is_blank() {
        return Ok(None);
    }

    let text = token.text();
    let value = u8::from_str_radix(text.trim(), 16)
        .map_err(|_| ProcessError::InvalidByte(text.into_owned()))?;

    if value >= 0x80 {
        Ok(Some(value))
    } else {
        Ok(None)
    }
}
