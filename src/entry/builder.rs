// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::entry::ZipEntry;
use crate::spec::attribute::AttributeCompatibility;
use crate::spec::compression::{Compression, CompressionLevel};
use crate::ZipDateTime;

/// A builder for [`ZipEntry`].
pub struct ZipEntryBuilder(pub(crate) ZipEntry);

impl From<ZipEntry> for ZipEntryBuilder {
    fn from(entry: ZipEntry) -> Self {
        Self(entry)
    }
}

impl ZipEntryBuilder {
    /// Constructs a new builder which defines the raw underlying data of a ZIP entry.
    ///
    /// A filename and compression method are needed to construct the builder as minimal parameters. The entry's
    /// modification time defaults to the current local time.
    pub fn new(filename: String, compression: Compression) -> Self {
        let mut entry = ZipEntry::new(filename, compression);
        entry.last_modification_date = ZipDateTime::now();
        Self(entry)
    }

    /// Sets the entry's filename.
    pub fn filename(mut self, filename: String) -> Self {
        self.0.filename = filename;
        self
    }

    /// Sets the entry's compression method.
    pub fn compression(mut self, compression: Compression) -> Self {
        self.0.compression = compression;
        self
    }

    /// Sets the level the entry's data is compressed with.
    ///
    /// [`CompressionLevel::None`] stores the entry regardless of its compression method.
    pub fn compression_level(mut self, level: CompressionLevel) -> Self {
        self.0.compression_level = level;
        self
    }

    /// Sets the entry's attribute host compatibility.
    pub fn attribute_compatibility(mut self, compatibility: AttributeCompatibility) -> Self {
        self.0.attribute_compatibility = compatibility;
        self
    }

    /// Sets the entry's last modification date.
    pub fn last_modification_date(mut self, date: ZipDateTime) -> Self {
        self.0.last_modification_date = date;
        self
    }

    /// Sets the entry's internal file attribute.
    pub fn internal_file_attribute(mut self, attribute: u16) -> Self {
        self.0.internal_file_attribute = attribute;
        self
    }

    /// Sets the entry's external file attribute.
    pub fn external_file_attribute(mut self, attribute: u32) -> Self {
        self.0.external_file_attribute = attribute;
        self
    }

    /// Sets the entry's Unix permissions mode.
    ///
    /// The file type bits are filled in from the entry's name, and the attribute host compatibility is set to Unix.
    pub fn unix_permissions(mut self, mode: u16) -> Self {
        let file_type = match self.0.dir() {
            true => 0o040000,
            false => 0o100000,
        };

        self.0.attribute_compatibility = AttributeCompatibility::Unix;
        self.0.external_file_attribute =
            ((file_type | (mode as u32 & 0o7777)) << 16) | self.0.directory_attribute();
        self
    }

    /// Sets the entry's file comment.
    pub fn comment(mut self, comment: String) -> Self {
        self.0.comment = comment;
        self
    }

    /// Consumes this builder and returns a final [`ZipEntry`].
    ///
    /// This is equivalent to:
    /// ```
    /// # use ziparchive::{ZipEntry, Compression, ZipEntryBuilder};
    /// #
    /// # let builder = ZipEntryBuilder::new(String::from("foo.bar"), Compression::Stored);
    /// let entry: ZipEntry = builder.into();
    /// ```
    pub fn build(self) -> ZipEntry {
        self.into()
    }
}
