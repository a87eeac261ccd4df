// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#444
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GeneralPurposeFlag {
    pub encrypted: bool,
    pub data_descriptor: bool,
    pub filename_unicode: bool,
    /// Bits 1 & 2, only meaningful for deflate entries.
    pub compression_option: u16,
}

impl From<u16> for GeneralPurposeFlag {
    fn from(value: u16) -> Self {
        Self {
            encrypted: value & 0x1 != 0,
            data_descriptor: value & 0x8 != 0,
            filename_unicode: value & 0x800 != 0,
            compression_option: value & 0b110,
        }
    }
}

impl From<GeneralPurposeFlag> for u16 {
    fn from(flags: GeneralPurposeFlag) -> Self {
        let encrypted: u16 = match flags.encrypted {
            false => 0x0,
            true => 0x1,
        };
        let data_descriptor: u16 = match flags.data_descriptor {
            false => 0x0,
            true => 0x8,
        };
        let filename_unicode: u16 = match flags.filename_unicode {
            false => 0x0,
            true => 0x800,
        };

        encrypted | data_descriptor | filename_unicode | (flags.compression_option & 0b110)
    }
}
