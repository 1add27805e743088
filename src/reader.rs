//! Token source: an explicit cursor over the hex character stream.
//!
//! Each pull consumes two characters and yields them as one token. A single
//! trailing character still forms a (shorter) token; running out of input is
//! not an error, and once the source is exhausted it stays exhausted. The
//! most recent token remains inspectable until the next pull, which is what
//! lets the processor look ahead at a command byte without consuming it.

use std::borrow::Cow;
use std::io::{self, Read};

/// Width of one token in stream characters.
pub const TOKEN_WIDTH: usize = 2;

/// One pulled token: one or two raw stream characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    bytes: [u8; TOKEN_WIDTH],
    len: u8,
}

impl Token {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    /// The token characters. Non-UTF-8 input is replaced lossily, which then
    /// fails hex parsing downstream rather than panicking here.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// True if the token is nothing but whitespace (stream padding).
    pub fn is_blank(&self) -> bool {
        self.as_bytes().iter().all(|b| b.is_ascii_whitespace())
    }

    #[cfg(test)]
    pub(crate) fn literal(text: &str) -> Token {
        let mut bytes = [0u8; TOKEN_WIDTH];
        bytes[..text.len()].copy_from_slice(text.as_bytes());
        Token {
            bytes,
            len: text.len() as u8,
        }
    }
}

/// Lazily yields fixed-width tokens from a character source.
#[derive(Debug)]
pub struct TokenSource<R: Read> {
    source: R,
    current: Option<Token>,
    exhausted: bool,
}

impl<R: Read> TokenSource<R> {
    pub fn new(source: R) -> Self {
        TokenSource {
            source,
            current: None,
            exhausted: false,
        }
    }

    /// The most recently pulled token, if any. Cleared once the source runs
    /// out.
    pub fn current(&self) -> Option<Token> {
        self.current
    }

    /// Pull the next token. Returns `Ok(None)` at end of input, permanently.
    /// I/O failures propagate unchanged.
    pub fn advance(&mut self) -> io::Result<Option<Token>> {
        if self.exhausted {
            return Ok(None);
        }

        let mut bytes = [0u8; TOKEN_WIDTH];
        let mut len = 0;
        while len < TOKEN_WIDTH {
            match self.read_one()? {
                Some(byte) => {
                    bytes[len] = byte;
                    len += 1;
                }
                None => break,
            }
        }

        if len == 0 {
            self.exhausted = true;
            self.current = None;
            return Ok(None);
        }

        let token = Token {
            bytes,
            len: len as u8,
        };
        self.current = Some(token);
        Ok(Some(token))
    }

    fn read_one(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_two_character_tokens() {
        let mut source = TokenSource::new("123456789".as_bytes());

        assert_eq!(source.current(), None);

        for expected in ["12", "34", "56", "78", "9"] {
            let token = source.advance().unwrap().unwrap();
            assert_eq!(token.text(), expected);
            assert_eq!(source.current(), Some(token));
        }
    }

    #[test]
    fn exhaustion_is_permanent() {
        let mut source = TokenSource::new("F0".as_bytes());

        assert!(source.advance().unwrap().is_some());
        assert_eq!(source.advance().unwrap(), None);
        assert_eq!(source.current(), None);
        assert_eq!(source.advance().unwrap(), None);
    }

    #[test]
    fn empty_source_yields_nothing() {
        let mut source = TokenSource::new("".as_bytes());
        assert_eq!(source.advance().unwrap(), None);
    }

    #[test]
    fn blank_detection() {
        assert!(Token::literal("\n").is_blank());
        assert!(Token::literal(" \t").is_blank());
        assert!(!Token::literal("4a").is_blank());
        assert!(!Token::literal(" 4").is_blank());
    }
}
