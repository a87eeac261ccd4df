// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::core::{raw, raw_deref};
use crate::error::Result;
use crate::spec::consts::DATA_DESCRIPTOR_SIGNATURE;
use crate::utils::{read_u32, write_u32};

use std::io::{Read, Write};

raw! {
    RawDataDescriptor {
        crc_32, u32, read_u32, write_u32,
        compressed_size, u32, read_u32, write_u32,
        uncompressed_size, u32, read_u32, write_u32
    }
}

#[derive(Clone, Debug)]
pub struct DataDescriptor {
    pub raw: RawDataDescriptor,
}

raw_deref!(DataDescriptor, RawDataDescriptor);

/// Reads a data descriptor from the provided reader, ensuring to skip the signature if present.
///
/// This function does so by:
/// - reading the first four bytes from the reader
/// - treating them as the CRC field if they don't match the signature
/// - reading the remainder of the raw data descriptor
#[tracing::instrument(skip(reader))]
pub fn read<R: Read>(reader: &mut R) -> Result<DataDescriptor> {
    let first = read_u32(reader)?;

    let crc_32 = match first {
        DATA_DESCRIPTOR_SIGNATURE => read_u32(reader)?,
        crc_32 => crc_32,
    };

    Ok(DataDescriptor {
        raw: RawDataDescriptor { crc_32, compressed_size: read_u32(reader)?, uncompressed_size: read_u32(reader)? },
    })
}

/// Writes a data descriptor to the provided writer.
///
/// This function does so by:
/// - writing the signature of the data descriptor
/// - writing the raw data descriptor
#[tracing::instrument(skip(writer, header))]
pub fn write<W: Write>(writer: &mut W, header: &DataDescriptor) -> Result<()> {
    write_u32(writer, DATA_DESCRIPTOR_SIGNATURE)?;
    raw_write(&mut *writer, &header.raw)?;
    Ok(())
}
