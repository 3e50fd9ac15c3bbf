//! `.rws` skin header codec.
//!
//! Layout (little-endian, 64 bytes):
//!
//! | offset | size | field |
//! |--------|------|-------|
//! | 0      | 4    | signature `.rws` |
//! | 4      | 2    | version, `i16` (1 or 2) |
//! | 6      | 1    | square edge size (version 1) |
//! | 7      | 1    | background mode (0..=4) |
//! | 8      | 16   | gradient colors RGBA: upper-left, upper-right, lower-right, lower-left |
//! | 24     | 4    | edge offsets (unused by drawing) |
//! | 28     | 36   | reserved |
//!
//! Nine images follow in [`Slot`] order. In version 2 each image is preceded by
//! its own `i16` width and `i16` height.

use std::io::Read;

use crate::paint::{Color, CornerColors};

use super::StyleError;

pub const SIGNATURE: [u8; 4] = *b".rws";
pub const HEADER_LEN: usize = 64;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum FormatVersion {
    /// Every image is `edge_size` x `edge_size`.
    V1,
    /// Every image carries its own size.
    V2,
}

impl FormatVersion {
    pub fn from_raw(raw: i16) -> Option<Self> {
        match raw {
            1 => Some(FormatVersion::V1),
            2 => Some(FormatVersion::V2),
            _ => None,
        }
    }

    pub fn to_raw(self) -> i16 {
        match self {
            FormatVersion::V1 => 1,
            FormatVersion::V2 => 2,
        }
    }
}

/// How the center of the panel is filled.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BackgroundMode {
    Tile,
    Stretch,
    Gradient,
    TileGradient,
    StretchGradient,
}

impl BackgroundMode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => BackgroundMode::Tile,
            1 => BackgroundMode::Stretch,
            2 => BackgroundMode::Gradient,
            3 => BackgroundMode::TileGradient,
            4 => BackgroundMode::StretchGradient,
            _ => return None,
        })
    }

    pub fn to_byte(self) -> u8 {
        match self {
            BackgroundMode::Tile => 0,
            BackgroundMode::Stretch => 1,
            BackgroundMode::Gradient => 2,
            BackgroundMode::TileGradient => 3,
            BackgroundMode::StretchGradient => 4,
        }
    }

    #[inline]
    pub fn tiles(self) -> bool {
        matches!(self, BackgroundMode::Tile | BackgroundMode::TileGradient)
    }

    #[inline]
    pub fn stretches(self) -> bool {
        matches!(self, BackgroundMode::Stretch | BackgroundMode::StretchGradient)
    }

    #[inline]
    pub fn has_gradient(self) -> bool {
        matches!(
            self,
            BackgroundMode::Gradient | BackgroundMode::TileGradient | BackgroundMode::StretchGradient
        )
    }
}

/// Image slots, in stream order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Slot {
    UpperLeft,
    Top,
    UpperRight,
    Right,
    LowerRight,
    Bottom,
    LowerLeft,
    Left,
    Background,
}

impl Slot {
    pub const ALL: [Slot; 9] = [
        Slot::UpperLeft,
        Slot::Top,
        Slot::UpperRight,
        Slot::Right,
        Slot::LowerRight,
        Slot::Bottom,
        Slot::LowerLeft,
        Slot::Left,
        Slot::Background,
    ];

    /// Position in the stream.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RwsHeader {
    pub version: FormatVersion,
    /// Square image size, version 1 only.
    pub edge_size: u8,
    pub background: BackgroundMode,
    pub gradient: CornerColors,
    pub edge_offsets: [u8; 4],
}

fn color_at(bytes: &[u8], offset: usize) -> Color {
    Color::rgba(bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3])
}

impl RwsHeader {
    /// Decodes a header, checking signature, version and background mode in
    /// that order.
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self, StyleError> {
        let found = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if found != SIGNATURE {
            return Err(StyleError::Signature { found });
        }

        let raw_version = i16::from_le_bytes([bytes[4], bytes[5]]);
        let version = FormatVersion::from_raw(raw_version).ok_or(StyleError::Version(raw_version))?;
        let background = BackgroundMode::from_byte(bytes[7]).ok_or(StyleError::BackgroundMode(bytes[7]))?;

        Ok(Self {
            version,
            edge_size: bytes[6],
            background,
            gradient: CornerColors::new(
                color_at(bytes, 8),
                color_at(bytes, 12),
                color_at(bytes, 16),
                color_at(bytes, 20),
            ),
            edge_offsets: [bytes[24], bytes[25], bytes[26], bytes[27]],
        })
    }

    /// Encodes the header. Reserved bytes are zero.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&SIGNATURE);
        out[4..6].copy_from_slice(&self.version.to_raw().to_le_bytes());
        out[6] = self.edge_size;
        out[7] = self.background.to_byte();
        for (i, color) in self.gradient.to_array().into_iter().enumerate() {
            let at = 8 + i * 4;
            out[at..at + 4].copy_from_slice(&color.to_bytes());
        }
        out[24..28].copy_from_slice(&self.edge_offsets);
        out
    }

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, StyleError> {
        let mut bytes = [0u8; HEADER_LEN];
        reader.read_exact(&mut bytes)?;
        Self::parse(&bytes)
    }
}
