// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::error::{Result, ZipError};

use std::io::{Read, Write};

pub(crate) fn read_u16<R: Read>(reader: &mut R) -> Result<u16> {
    let mut buffer = [0; 2];
    reader.read_exact(&mut buffer)?;
    Ok(u16::from_le_bytes(buffer))
}

pub(crate) fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    let mut buffer = [0; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

pub(crate) fn write_u16<W: Write>(writer: &mut W, value: u16) -> Result<()> {
    Ok(writer.write_all(&value.to_le_bytes())?)
}

pub(crate) fn write_u32<W: Write>(writer: &mut W, value: u32) -> Result<()> {
    Ok(writer.write_all(&value.to_le_bytes())?)
}

/// Read and return a dynamic length vector of bytes from a reader.
///
/// Unlike a plain `take().read_to_end()`, a short read is reported as an [`std::io::ErrorKind::UnexpectedEof`].
pub(crate) fn read_bytes<R: Read>(reader: &mut R, length: usize) -> Result<Vec<u8>> {
    let mut buffer = vec![0; length];
    reader.read_exact(&mut buffer)?;
    Ok(buffer)
}

/// Assert that the next four-byte signature read by a reader matches the expected signature.
pub(crate) fn assert_signature<R: Read>(reader: &mut R, expected: u32) -> Result<()> {
    match read_u32(reader)? {
        actual if actual == expected => Ok(()),
        actual => Err(ZipError::UnexpectedHeaderError(actual, expected)),
    }
}
