//! Argument decoding.
//!
//! Drawing-command arguments arrive as two stream bytes of seven payload
//! bits each, biased so the zero point sits mid-range. The processor only
//! needs the [`Decode`] seam; [`Sixteen14Codec`] is the wire format the
//! default command set uses.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("expected {expected} hex characters, received {received} ({token:?})")]
    BadLength {
        token: String,
        expected: usize,
        received: usize,
    },

    #[error("token {0:?} is not valid hexadecimal")]
    InvalidHex(String),

    #[error("payload byte {0:#04x} has its top bit set")]
    PayloadBitSet(u8),
}

/// Decodes one joined argument token into an integer.
pub trait Decode {
    fn decode(&self, token: &str) -> Result<i64, CodecError>;
}

/// The 16-bit/14-bit argument codec.
///
/// A value is carried in two bytes with the top bit clear, seven payload bits
/// each, offset by 8192: `value = (hi << 7 | lo) - 8192`. The representable
/// range is -8192..=8191.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sixteen14Codec;

impl Sixteen14Codec {
    pub fn new() -> Self {
        Sixteen14Codec
    }
}

impl Decode for Sixteen14Codec {
    fn decode(&self, token: &str) -> Result<i64, CodecError> {
        if !token.is_ascii() || token.len() != 4 {
            return Err(CodecError::BadLength {
                token: token.to_string(),
                expected: 4,
                received: token.chars().count(),
            });
        }

        let parse = |chunk: &str| {
            u8::from_str_radix(chunk, 16).map_err(|_| CodecError::InvalidHex(token.to_string()))
        };

        let hi = parse(&token[0..2])?;
        let lo = parse(&token[2..4])?;

        for byte in [hi, lo] {
            if byte > 0x7F {
                return Err(CodecError::PayloadBitSet(byte));
            }
        }

        Ok(((hi as i64) << 7 | lo as i64) - 8192)
    }
}
