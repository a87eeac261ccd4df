// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::core::cdr::{self, CentralDirectoryRecord};
use crate::core::eocdr::{self, EndOfCentralDirectoryRecord};
use crate::error::{Result, ZipError};
use crate::spec::consts::{NON_ZIP64_MAX_NUM_FILES, NON_ZIP64_MAX_SIZE};

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

/// A central directory as found on disk: its records, the EOCDR describing them, and where that EOCDR sits.
#[derive(Clone, Debug)]
pub struct CentralDirectory {
    pub records: Vec<CentralDirectoryRecord>,
    pub eocdr: EndOfCentralDirectoryRecord,
    pub eocdr_offset: u64,
}

impl CentralDirectory {
    /// Returns the offset of the directory's first byte, which is also where the entry data ends.
    pub fn offset(&self) -> u64 {
        self.eocdr.offset_of_start_of_central_directory as u64
    }
}

/// Locates and reads the central directory from the given reader.
///
/// This function does so by:
/// - locating and reading the end of central directory record
/// - rejecting multi-disk and ZIP64 archives
/// - bounds checking the directory against the position of the EOCDR
/// - reading central directory records until the directory's bytes are exhausted
/// - asserting the number of records matches the declared count
#[tracing::instrument(skip(reader))]
pub fn read<R: Read + Seek>(reader: &mut R) -> Result<CentralDirectory> {
    let eocdr_offset = eocdr::locate(reader)?;
    reader.seek(SeekFrom::Start(eocdr_offset))?;
    let eocdr = eocdr::read(reader)?;

    if eocdr.number_of_this_disk != eocdr.number_of_the_disk_with_the_start_of_the_central_directory
        || eocdr.total_number_of_entries_in_the_central_directory_on_this_disk
            != eocdr.total_number_of_entries_in_the_central_directory
    {
        return Err(ZipError::FeatureNotSupported("spanned/split files"));
    }

    if eocdr.total_number_of_entries_in_the_central_directory == NON_ZIP64_MAX_NUM_FILES
        || eocdr.size_of_the_central_directory == NON_ZIP64_MAX_SIZE
        || eocdr.offset_of_start_of_central_directory == NON_ZIP64_MAX_SIZE
    {
        return Err(ZipError::Zip64Needed);
    }

    let cd_offset = eocdr.offset_of_start_of_central_directory as u64;
    let cd_size = eocdr.size_of_the_central_directory as u64;

    if cd_offset + cd_size > eocdr_offset {
        return Err(ZipError::DirectoryOutOfBounds);
    }

    reader.seek(SeekFrom::Start(cd_offset))?;
    let mut cursor = Cursor::new(crate::utils::read_bytes(reader, cd_size as usize)?);

    let expected = eocdr.total_number_of_entries_in_the_central_directory as u64;
    let mut records = Vec::with_capacity(expected as usize);

    while cursor.position() < cd_size {
        records.push(cdr::read(&mut cursor)?);
    }

    if records.len() as u64 != expected {
        return Err(ZipError::EntryCountMismatch { expected, actual: records.len() as u64 });
    }

    tracing::debug!(entries = records.len(), cd_offset, cd_size, "read central directory");
    Ok(CentralDirectory { records, eocdr, eocdr_offset })
}

/// Writes a central directory to the given writer.
///
/// This function does so by:
/// - writing the provided central directory records
/// - writing the provided end of central directory record
#[tracing::instrument(skip(writer, records, eocdr))]
pub fn write<W: Write>(
    writer: &mut W,
    records: &[CentralDirectoryRecord],
    eocdr: &EndOfCentralDirectoryRecord,
) -> Result<()> {
    for record in records {
        cdr::write(writer, record)?;
    }

    eocdr::write(writer, eocdr)?;

    Ok(())
}
