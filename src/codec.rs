// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Whole-buffer compression, decompression, and checksumming of entry payloads.

use crate::error::{Result, ZipError};
use crate::spec::compression::{Compression, CompressionLevel};

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;

/// Computes the CRC-32 (IEEE) checksum of the given bytes.
pub fn crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Compresses raw bytes with the given method and level.
///
/// A level of [`CompressionLevel::None`] always stores, whatever the requested method.
pub fn compress(data: &[u8], compression: Compression, level: CompressionLevel) -> Result<Vec<u8>> {
    match level.effective(compression) {
        Compression::Stored => Ok(data.to_vec()),
        Compression::Deflate => {
            let mut encoder = DeflateEncoder::new(Vec::with_capacity(data.len() / 2), level.into_flate2());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
    }
}

/// Decompresses bytes with the given method, asserting the result is exactly `expected_size` bytes long.
///
/// A stream error reported by the codec, or any disagreement in length, is reported as corrupt data.
pub fn decompress(data: &[u8], compression: Compression, expected_size: u64) -> Result<Vec<u8>> {
    let decoded = match compression {
        Compression::Stored => data.to_vec(),
        Compression::Deflate => {
            // Reading one byte past the expected size is enough to detect an oversized stream without inflating all
            // of it.
            let mut decoder = DeflateDecoder::new(data).take(expected_size.saturating_add(1));
            let mut buffer = Vec::with_capacity(expected_size.min(data.len() as u64 * 4) as usize);

            decoder.read_to_end(&mut buffer).map_err(|err| ZipError::CorruptStream(err.to_string()))?;
            buffer
        }
    };

    if decoded.len() as u64 != expected_size {
        return Err(ZipError::SizeMismatch { expected: expected_size, actual: decoded.len() as u64 });
    }

    Ok(decoded)
}
