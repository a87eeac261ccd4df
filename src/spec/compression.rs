// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::error::{Result, ZipError};

/// A compression method supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    Stored,
    #[default]
    Deflate,
}

impl TryFrom<u16> for Compression {
    type Error = ZipError;

    // Convert a u16 stored with little endianness into a supported compression method.
    // https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#445
    fn try_from(value: u16) -> Result<Self> {
        match value {
            0 => Ok(Compression::Stored),
            8 => Ok(Compression::Deflate),
            _ => Err(ZipError::CompressionNotSupported(value)),
        }
    }
}

impl From<&Compression> for u16 {
    // Convert a supported compression method into its relevant u16 stored with little endianness.
    // https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#445
    fn from(compression: &Compression) -> u16 {
        match compression {
            Compression::Stored => 0,
            Compression::Deflate => 8,
        }
    }
}

impl From<Compression> for u16 {
    fn from(compression: Compression) -> u16 {
        (&compression).into()
    }
}

/// Level of compression data should be compressed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// Default quality of compression defined by the codec (level 6 for deflate).
    #[default]
    Default,
    /// No compression at all. Entries written at this level are stored regardless of their requested method.
    None,
    /// Fastest quality of compression, usually produces bigger size.
    Speed,
    /// Best quality of compression, usually produces the smallest size.
    Best,
    /// Precise quality on the codec's 0 - 9 scale. Values above 9 are clamped.
    Precise(u32),
}

impl CompressionLevel {
    /// Resolves the method an entry is actually written with at this level.
    pub(crate) fn effective(self, compression: Compression) -> Compression {
        match self {
            CompressionLevel::None | CompressionLevel::Precise(0) => Compression::Stored,
            _ => compression,
        }
    }

    pub(crate) fn into_flate2(self) -> flate2::Compression {
        match self {
            CompressionLevel::Default => flate2::Compression::default(),
            CompressionLevel::None => flate2::Compression::none(),
            CompressionLevel::Speed => flate2::Compression::fast(),
            CompressionLevel::Best => flate2::Compression::best(),
            CompressionLevel::Precise(level) => flate2::Compression::new(level.min(9)),
        }
    }

    /// Returns the general purpose flag bits 1 & 2 which advertise this level for deflate entries.
    ///
    /// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#444
    pub(crate) fn deflate_flag_bits(self) -> u16 {
        match self.into_flate2().level() {
            0..=1 => 0b110,
            2..=5 => 0b100,
            6..=7 => 0b000,
            _ => 0b010,
        }
    }
}
