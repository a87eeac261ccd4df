// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::entry::StoredZipEntry;

/// An immutable store of data about a ZIP file: its central directory in on-disk order, and its comment.
///
/// A [`ZipFile`] is a snapshot. Listings handed out by sessions are clones and are unaffected by later writes to the
/// archive they were taken from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZipFile {
    pub(crate) entries: Vec<StoredZipEntry>,
    pub(crate) comment: String,
}

impl ZipFile {
    /// Returns a list of this ZIP file's entries.
    pub fn entries(&self) -> &[StoredZipEntry] {
        &self.entries
    }

    /// Returns this ZIP file's trailing comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the number of entries in this ZIP file.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether this ZIP file has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry with the given filename, if present.
    pub fn entry(&self, filename: &str) -> Option<&StoredZipEntry> {
        self.entries.iter().find(|entry| entry.filename() == filename)
    }

    /// Returns the index of the entry with the given filename, if present.
    pub fn index_of(&self, filename: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.filename() == filename)
    }
}
