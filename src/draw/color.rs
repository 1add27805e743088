//! RGBA pen color.

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("expected 4 colour channels (r, g, b, a), received {0}")]
    BadChannelCount(usize),

    #[error("colour channel value {0} is outside of the domain (0-255)")]
    ChannelOutOfRange(i64),
}

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Build a color from exactly four decoded channel values, rejecting
    /// anything outside 0..=255.
    pub fn from_channels(channels: &[i64]) -> Result<Self, ColorError> {
        if channels.len() != 4 {
            return Err(ColorError::BadChannelCount(channels.len()));
        }

        for &channel in channels {
            if !(0..=255).contains(&channel) {
                return Err(ColorError::ChannelOutOfRange(channel));
            }
        }

        Ok(Color {
            r: channels[0] as u8,
            g: channels[1] as u8,
            b: channels[2] as u8,
            a: channels[3] as u8,
        })
    }
}

impl Default for Color {
    /// Opaque black.
    fn default() -> Self {
        Color::new(0, 0, 0, 255)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}
