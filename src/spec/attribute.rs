// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

/// An attribute host compatibility supported by this crate.
///
/// Hosts other than Unix are treated as MS-DOS, whose external attributes carry no permission bits.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttributeCompatibility {
    Dos,
    #[default]
    Unix,
}

impl From<u16> for AttributeCompatibility {
    // Convert the upper byte of "version made by" into an attribute host compatibility.
    // https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4422
    fn from(value: u16) -> Self {
        match value {
            3 => AttributeCompatibility::Unix,
            _ => AttributeCompatibility::Dos,
        }
    }
}

impl From<&AttributeCompatibility> for u16 {
    // Convert a supported attribute host compatibility into its relevant u16 stored with little endianness.
    // https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4422
    fn from(compatibility: &AttributeCompatibility) -> Self {
        match compatibility {
            AttributeCompatibility::Dos => 0,
            AttributeCompatibility::Unix => 3,
        }
    }
}

impl From<AttributeCompatibility> for u16 {
    fn from(compatibility: AttributeCompatibility) -> Self {
        (&compatibility).into()
    }
}
