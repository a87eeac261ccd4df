// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::entry::ZipEntry;
use crate::spec::attribute::AttributeCompatibility;
use crate::spec::compression::Compression;

pub(crate) const SPEC_VERSION_MADE_BY: u16 = 20;

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#443
pub fn as_needed_to_extract(entry: &ZipEntry) -> u16 {
    let mut version = match entry.compression() {
        Compression::Deflate => 20,
        Compression::Stored => 10,
    };

    if entry.dir() || entry.encrypted() {
        version = std::cmp::max(version, 20);
    }

    version
}

// https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#442
pub fn as_made_by(compatibility: AttributeCompatibility) -> u16 {
    (u16::from(compatibility) << 8) | SPEC_VERSION_MADE_BY
}
