// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::core::{raw, raw_deref};
use crate::error::Result;
use crate::spec::consts::{LFH_LENGTH, LFH_SIGNATURE, SIGNATURE_LENGTH};
use crate::utils::{read_u16, read_u32, write_u16, write_u32};

use std::io::{Read, Write};

raw! {
    RawLocalFileHeader {
        version_needed_to_extract, u16, read_u16, write_u16,
        general_purpose_flags, u16, read_u16, write_u16,
        compression_method, u16, read_u16, write_u16,
        last_mod_file_time, u16, read_u16, write_u16,
        last_mod_file_date, u16, read_u16, write_u16,
        crc_32, u32, read_u32, write_u32,
        compressed_size, u32, read_u32, write_u32,
        uncompressed_size, u32, read_u32, write_u32,
        file_name_length, u16, read_u16, write_u16,
        extra_field_length, u16, read_u16, write_u16
    }
}

#[derive(Clone, Debug)]
pub struct LocalFileHeader {
    pub raw: RawLocalFileHeader,
    pub file_name: Vec<u8>,
    pub extra_field: Vec<u8>,
}

raw_deref!(LocalFileHeader, RawLocalFileHeader);

impl LocalFileHeader {
    /// Returns the total length of this header once written, including its signature.
    ///
    /// An entry's payload starts exactly this many bytes after the header's offset.
    pub fn total_length(&self) -> u64 {
        (SIGNATURE_LENGTH + LFH_LENGTH + self.file_name.len() + self.extra_field.len()) as u64
    }
}

/// Reads a local file header from the given reader.
///
/// This function does so by:
/// - asserting the signature of the local file header
/// - reading the raw local file header
/// - reading the file name
/// - reading the extra field
#[tracing::instrument(skip(reader))]
pub fn read<R: Read>(reader: &mut R) -> Result<LocalFileHeader> {
    crate::utils::assert_signature(reader, LFH_SIGNATURE)?;

    let raw = raw_read(&mut *reader)?;
    let file_name = crate::utils::read_bytes(reader, raw.file_name_length as usize)?;
    let extra_field = crate::utils::read_bytes(reader, raw.extra_field_length as usize)?;

    Ok(LocalFileHeader { raw, file_name, extra_field })
}

/// Writes a local file header to the given writer.
///
/// This function does so by:
/// - writing the signature of the local file header
/// - writing the raw local file header
/// - writing the file name
/// - writing the extra field
#[tracing::instrument(skip(writer, header))]
pub fn write<W: Write>(writer: &mut W, header: &LocalFileHeader) -> Result<()> {
    write_u32(writer, LFH_SIGNATURE)?;

    raw_write(&mut *writer, &header.raw)?;
    writer.write_all(&header.file_name)?;
    writer.write_all(&header.extra_field)?;

    Ok(())
}
