// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Configuration for the write and read sessions.

use crate::spec::compression::{Compression, CompressionLevel};
use crate::string::NameEncoding;

/// Options applied to every entry appended by a write session.
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    pub(crate) compression: Compression,
    pub(crate) level: CompressionLevel,
    pub(crate) password: Option<Vec<u8>>,
    pub(crate) encoding: NameEncoding,
    pub(crate) append: bool,
    pub(crate) comment: Option<String>,
}

impl WriteOptions {
    /// Constructs the default options: deflate at the default level, no password, UTF-8 names, and a fresh archive.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    pub fn level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Encrypts every entry with the traditional ZIP cipher.
    pub fn password(mut self, password: impl AsRef<[u8]>) -> Self {
        self.password = Some(password.as_ref().to_vec());
        self
    }

    pub fn encoding(mut self, encoding: NameEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Appends to an existing archive rather than replacing it. A missing archive is created as usual.
    pub fn append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    /// Sets the archive comment. When appending without one, the existing comment is kept.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Options applied by a read session.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    pub(crate) password: Option<Vec<u8>>,
    pub(crate) encoding: NameEncoding,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the password used for encrypted entries. It isn't checked until an encrypted entry is extracted.
    pub fn password(mut self, password: impl AsRef<[u8]>) -> Self {
        self.password = Some(password.as_ref().to_vec());
        self
    }

    /// Sets the encoding names without the UTF-8 flag are decoded with.
    pub fn encoding(mut self, encoding: NameEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Options applied when extracting all entries to a directory.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub(crate) overwrite: bool,
    pub(crate) restore_times: bool,
    pub(crate) restore_permissions: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self { overwrite: false, restore_times: true, restore_permissions: true }
    }
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites existing files without consulting the policy.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Sets each extracted file's modification time from its entry.
    pub fn restore_times(mut self, restore: bool) -> Self {
        self.restore_times = restore;
        self
    }

    /// Sets each extracted file's Unix permissions from its entry, where stored.
    pub fn restore_permissions(mut self, restore: bool) -> Self {
        self.restore_permissions = restore;
        self
    }
}
