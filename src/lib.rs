// Copyright (c) 2021-2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! # ziparchive
//!
//! A synchronous ZIP archive engine for creating, appending to, listing, and extracting archives.
//!
//! ## Features
//! - Stored and Deflate compression, with selectable Deflate levels.
//! - Traditional PKWARE ("ZipCrypto") password encryption and decryption.
//! - Whole-data entries and streamed entries of unknown size (via data descriptors).
//! - Legacy code page names through [`NameEncoding`].
//! - Path-based [`WriteSession`] and [`ReadSession`] types with caller-supplied overwrite and progress policies.
//! - Aims for reasonable [specification](https://pkware.cachefly.net/webdocs/casestudies/APPNOTE.TXT) compliance.
//!
//! ZIP64, multi-disk archives, and AES encryption aren't supported.
//!
//! ## Example
//! ```no_run
//! # use ziparchive::{ExtractOptions, ExtractPolicy, ReadOptions, ReadSession, WriteOptions, WriteSession};
//! # use ziparchive::error::Result;
//! #
//! fn run() -> Result<()> {
//!     let mut writer = WriteSession::new();
//!     writer.open("./foo.zip", WriteOptions::new())?;
//!     writer.add_data("foo.txt", b"Hello, world!")?;
//!     writer.finalize()?;
//!
//!     let mut reader = ReadSession::new();
//!     reader.open("./foo.zip", ReadOptions::new())?;
//!     reader.extract_all("./out", ExtractPolicy::new(), &ExtractOptions::new())?;
//!     reader.close()
//! }
//! ```

pub mod base;
pub mod codec;
pub(crate) mod core;
pub mod crypto;
pub mod error;
pub mod fs;
pub mod opts;
pub mod policy;
pub mod session;

pub(crate) mod date;
pub(crate) mod entry;
pub(crate) mod file;
pub(crate) mod spec;
pub(crate) mod string;
pub(crate) mod utils;

#[cfg(test)]
pub(crate) mod tests;

pub use crate::spec::{
    attribute::AttributeCompatibility,
    compression::{Compression, CompressionLevel},
};

pub use crate::date::{builder::ZipDateTimeBuilder, ZipDateTime};
pub use crate::entry::{builder::ZipEntryBuilder, StoredZipEntry, ZipEntry};
pub use crate::file::ZipFile;
pub use crate::fs::{FileAttributes, FileSystem, StdFileSystem};
pub use crate::opts::{ExtractOptions, ReadOptions, WriteOptions};
pub use crate::policy::{ExtractPolicy, Progress};
pub use crate::session::{
    ExtractFailure, ExtractOutcome, ExtractReport, MemoryReport, ReadSession, SessionState, WriteSession,
};
pub use crate::string::NameEncoding;
