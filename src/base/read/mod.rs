// Copyright (c) 2022-2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which supports reading ZIP files.

pub mod seek;

use crate::core::cdr::CentralDirectoryRecord;
use crate::date::ZipDateTime;
use crate::entry::{StoredZipEntry, ZipEntry};
use crate::error::{Result, ZipError};
use crate::file::ZipFile;
use crate::spec::attribute::AttributeCompatibility;
use crate::spec::compression::{Compression, CompressionLevel};
use crate::spec::consts::{DATA_DESCRIPTOR_LENGTH, LFH_LENGTH, NON_ZIP64_MAX_SIZE, SIGNATURE_LENGTH};
use crate::spec::header::GeneralPurposeFlag;
use crate::string::NameEncoding;

use std::io::{Read, Seek};

/// Locates and parses the central directory into a [`ZipFile`].
pub(crate) fn file<R>(reader: &mut R, encoding: NameEncoding) -> Result<ZipFile>
where
    R: Read + Seek,
{
    let directory = crate::core::cd::read(reader)?;

    let entries =
        directory.records.iter().map(|record| stored_entry(record, encoding)).collect::<Result<Vec<_>>>()?;

    for entry in &entries {
        assert_within(entry, directory.offset())?;
    }

    let comment = encoding.decode(&directory.eocdr.zip_file_comment, false);

    Ok(ZipFile { entries, comment })
}

/// Interprets a raw central directory record as an entry.
pub(crate) fn stored_entry(record: &CentralDirectoryRecord, encoding: NameEncoding) -> Result<StoredZipEntry> {
    if record.compressed_size == NON_ZIP64_MAX_SIZE
        || record.uncompressed_size == NON_ZIP64_MAX_SIZE
        || record.relative_offset_of_local_header == NON_ZIP64_MAX_SIZE
    {
        return Err(ZipError::Zip64Needed);
    }

    let flags = GeneralPurposeFlag::from(record.general_purpose_flags);

    let entry = ZipEntry {
        filename: encoding.decode(&record.file_name, flags.filename_unicode),
        compression: Compression::try_from(record.compression_method)?,
        compression_level: CompressionLevel::Default,
        crc32: record.crc_32,
        uncompressed_size: record.uncompressed_size as u64,
        compressed_size: record.compressed_size as u64,
        attribute_compatibility: AttributeCompatibility::from(record.version_made_by >> 8),
        last_modification_date: ZipDateTime::from_raw(record.last_mod_file_date, record.last_mod_file_time),
        internal_file_attribute: record.internal_file_attributes,
        external_file_attribute: record.external_file_attributes,
        comment: encoding.decode(&record.file_comment, flags.filename_unicode),
        encrypted: flags.encrypted,
        data_descriptor: flags.data_descriptor,
    };

    Ok(StoredZipEntry { entry, file_offset: record.relative_offset_of_local_header as u64 })
}

/// Asserts an entry's local header, data, and any data descriptor end before the central directory starts.
fn assert_within(entry: &StoredZipEntry, cd_offset: u64) -> Result<()> {
    let descriptor = if entry.data_descriptor() { DATA_DESCRIPTOR_LENGTH as u64 } else { 0 };
    let end = entry.header_offset() + (SIGNATURE_LENGTH + LFH_LENGTH) as u64 + entry.compressed_size() + descriptor;

    match end > cd_offset {
        true => Err(ZipError::EntryOutOfBounds(entry.filename().to_string())),
        false => Ok(()),
    }
}
