// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub mod builder;

use std::ops::Deref;

use crate::entry::builder::ZipEntryBuilder;
use crate::spec::attribute::AttributeCompatibility;
use crate::spec::compression::{Compression, CompressionLevel};
use crate::ZipDateTime;

/// The MS-DOS directory attribute bit, set in the low byte of the external file attribute.
const DOS_DIRECTORY_ATTRIBUTE: u32 = 0x10;

/// An immutable store of data about a ZIP entry.
///
/// This type cannot be directly constructed so instead, the [`ZipEntryBuilder`] must be used. Internally this builder
/// stores a [`ZipEntry`] so conversions between these two types via the [`From`] implementations will be
/// non-allocating.
///
/// # Note
/// The CRC, sizes, and encryption flag of an entry are filled in by the writer once its data has been written, and
/// by the reader from the central directory. Values set on an entry passed to a writer are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ZipEntry {
    pub(crate) filename: String,
    pub(crate) compression: Compression,
    pub(crate) compression_level: CompressionLevel,
    pub(crate) crc32: u32,
    pub(crate) uncompressed_size: u64,
    pub(crate) compressed_size: u64,
    pub(crate) attribute_compatibility: AttributeCompatibility,
    pub(crate) last_modification_date: ZipDateTime,
    pub(crate) internal_file_attribute: u16,
    pub(crate) external_file_attribute: u32,
    pub(crate) comment: String,
    pub(crate) encrypted: bool,
    pub(crate) data_descriptor: bool,
}

impl From<ZipEntryBuilder> for ZipEntry {
    fn from(builder: ZipEntryBuilder) -> Self {
        builder.0
    }
}

impl ZipEntry {
    pub(crate) fn new(filename: String, compression: Compression) -> Self {
        ZipEntry {
            filename,
            compression,
            compression_level: CompressionLevel::Default,
            crc32: 0,
            uncompressed_size: 0,
            compressed_size: 0,
            attribute_compatibility: AttributeCompatibility::Unix,
            last_modification_date: ZipDateTime::default(),
            internal_file_attribute: 0,
            external_file_attribute: 0,
            comment: String::new(),
            encrypted: false,
            data_descriptor: false,
        }
    }

    /// Returns the entry's filename.
    ///
    /// ## Note
    /// This will return the raw filename stored during ZIP creation. If calling this method on entries retrieved from
    /// untrusted ZIP files, the filename should be sanitised before being used as a path to prevent [directory
    /// traversal attacks](https://en.wikipedia.org/wiki/Directory_traversal_attack).
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the entry's compression method.
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Returns the entry's compression level.
    ///
    /// This is only meaningful for entries being written; entries read from an archive report the default.
    pub fn compression_level(&self) -> CompressionLevel {
        self.compression_level
    }

    /// Returns the entry's CRC32 value.
    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    /// Returns the entry's uncompressed size.
    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }

    /// Returns the entry's compressed size.
    ///
    /// For encrypted entries this includes the 12-byte encryption header.
    pub fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    /// Returns the entry's attribute's host compatibility.
    pub fn attribute_compatibility(&self) -> AttributeCompatibility {
        self.attribute_compatibility
    }

    /// Returns the entry's last modification time & date.
    pub fn last_modification_date(&self) -> &ZipDateTime {
        &self.last_modification_date
    }

    /// Returns the entry's internal file attribute.
    pub fn internal_file_attribute(&self) -> u16 {
        self.internal_file_attribute
    }

    /// Returns the entry's external file attribute.
    pub fn external_file_attribute(&self) -> u32 {
        self.external_file_attribute
    }

    /// Returns the entry's file comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns whether the entry's payload is encrypted.
    pub fn encrypted(&self) -> bool {
        self.encrypted
    }

    /// Returns whether the entry's CRC and sizes were deferred to a trailing data descriptor.
    pub fn data_descriptor(&self) -> bool {
        self.data_descriptor
    }

    /// Returns the entry's Unix permission bits, if any were stored.
    pub fn unix_permissions(&self) -> Option<u32> {
        if !matches!(self.attribute_compatibility, AttributeCompatibility::Unix) {
            return None;
        }

        match (self.external_file_attribute >> 16) & 0o7777 {
            0 => None,
            mode => Some(mode),
        }
    }

    /// Returns whether or not the entry represents a directory.
    pub fn dir(&self) -> bool {
        self.filename.ends_with('/')
    }

    pub(crate) fn directory_attribute(&self) -> u32 {
        match self.dir() {
            true => DOS_DIRECTORY_ATTRIBUTE,
            false => 0,
        }
    }
}

/// An immutable store of data about how a ZIP entry is stored within a specific archive.
///
/// Besides storing archive independent information like the size and timestamp it can also be used to query
/// information about how the entry is stored in an archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredZipEntry {
    pub(crate) entry: ZipEntry,
    pub(crate) file_offset: u64,
}

impl StoredZipEntry {
    /// Returns the offset in bytes to where the header of the entry starts.
    pub fn header_offset(&self) -> u64 {
        self.file_offset
    }

    /// Returns the archive independent entry data.
    pub fn entry(&self) -> &ZipEntry {
        &self.entry
    }
}

impl Deref for StoredZipEntry {
    type Target = ZipEntry;

    fn deref(&self) -> &Self::Target {
        &self.entry
    }
}
