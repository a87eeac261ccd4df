// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! <https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#4316>
//!
//! The end of central directory record may be followed by a variable-length comment, so its start can't be assumed
//! to sit 22 bytes before the end of the data. It has to be located by searching backwards for its signature.
//!
//! The search window is bounded by the largest possible comment, so the whole window is read in a single pass and
//! reverse-searched in memory. A candidate signature is only accepted if the record it starts fits the remaining
//! bytes exactly or with its declared comment. This rejects signature bytes which happen to appear inside a comment
//! and makes a truncated archive fail to locate rather than misparse.

use crate::core::{raw, raw_deref};
use crate::error::{Result, ZipError};
use crate::spec::consts::{EOCDR_LENGTH, EOCDR_SEARCH_WINDOW, EOCDR_SIGNATURE, SIGNATURE_LENGTH};
use crate::utils::{read_u16, read_u32, write_u16, write_u32};

use std::io::{Read, Seek, SeekFrom, Write};

raw! {
    RawEndOfCentralDirectoryRecord {
        number_of_this_disk, u16, read_u16, write_u16,
        number_of_the_disk_with_the_start_of_the_central_directory, u16, read_u16, write_u16,
        total_number_of_entries_in_the_central_directory_on_this_disk, u16, read_u16, write_u16,
        total_number_of_entries_in_the_central_directory, u16, read_u16, write_u16,
        size_of_the_central_directory, u32, read_u32, write_u32,
        offset_of_start_of_central_directory, u32, read_u32, write_u32,
        zip_file_comment_length, u16, read_u16, write_u16
    }
}

#[derive(Clone, Debug)]
pub struct EndOfCentralDirectoryRecord {
    pub raw: RawEndOfCentralDirectoryRecord,
    pub zip_file_comment: Vec<u8>,
}

raw_deref!(EndOfCentralDirectoryRecord, RawEndOfCentralDirectoryRecord);

/// Reads the end of central directory record from the given reader.
///
/// This function does so by:
/// - asserting the signature of the end of central directory record
/// - reading the raw end of central directory record
/// - reading the zip file comment
#[tracing::instrument(skip(reader))]
pub fn read<R: Read>(reader: &mut R) -> Result<EndOfCentralDirectoryRecord> {
    crate::utils::assert_signature(reader, EOCDR_SIGNATURE)?;

    let raw = raw_read(&mut *reader)?;
    let zip_file_comment = crate::utils::read_bytes(reader, raw.zip_file_comment_length as usize)?;

    Ok(EndOfCentralDirectoryRecord { raw, zip_file_comment })
}

/// Writes the end of central directory record to the given writer.
///
/// This function does so by:
/// - writing the signature of the end of central directory record
/// - writing the raw end of central directory record
/// - writing the zip file comment
#[tracing::instrument(skip(writer, header))]
pub fn write<W: Write>(writer: &mut W, header: &EndOfCentralDirectoryRecord) -> Result<()> {
    write_u32(writer, EOCDR_SIGNATURE)?;

    raw_write(&mut *writer, &header.raw)?;
    writer.write_all(&header.zip_file_comment)?;

    Ok(())
}

/// Locates the end of central directory record, returning the offset of its signature.
#[tracing::instrument(skip(reader))]
pub fn locate<R: Read + Seek>(reader: &mut R) -> Result<u64> {
    let length = reader.seek(SeekFrom::End(0))?;

    if length < (SIGNATURE_LENGTH + EOCDR_LENGTH) as u64 {
        return Err(ZipError::UnableToLocateEOCDR);
    }

    let window = length.min(EOCDR_SEARCH_WINDOW);
    let start = length - window;

    reader.seek(SeekFrom::Start(start))?;
    let buffer = crate::utils::read_bytes(reader, window as usize)?;

    let signature = EOCDR_SIGNATURE.to_le_bytes();
    let mut end = buffer.len();

    while let Some(match_index) = reverse_search_buffer(&buffer[..end], &signature) {
        let position = match_index + 1 - SIGNATURE_LENGTH;

        if let Some(record_end) = record_end(&buffer[position..]) {
            if position + record_end == buffer.len() {
                tracing::debug!(offset = start + position as u64, "located end of central directory record");
                return Ok(start + position as u64);
            }
        }

        // Resume the search just before this false match.
        end = match_index;
    }

    Err(ZipError::UnableToLocateEOCDR)
}

/// Returns the total length of the EOCDR starting at the given buffer, if the fixed fields fit within it.
fn record_end(buffer: &[u8]) -> Option<usize> {
    let fixed = SIGNATURE_LENGTH + EOCDR_LENGTH;
    let comment_length = buffer.get(fixed - 2..fixed)?;
    let comment_length = u16::from_le_bytes([comment_length[0], comment_length[1]]) as usize;

    Some(fixed + comment_length)
}

/// A naive reverse linear search along the buffer for the specified signature bytes.
///
/// Returns the index of the signature's *last* byte.
pub(crate) fn reverse_search_buffer(buffer: &[u8], signature: &[u8]) -> Option<usize> {
    'outer: for index in (0..buffer.len()).rev() {
        for (signature_index, signature_byte) in signature.iter().rev().enumerate() {
            if let Some(next_index) = index.checked_sub(signature_index) {
                if buffer[next_index] != *signature_byte {
                    continue 'outer;
                }
            } else {
                break 'outer;
            }
        }
        return Some(index);
    }
    None
}
