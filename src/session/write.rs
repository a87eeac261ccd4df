// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A session which creates or appends to an archive on a [`FileSystem`].
//!
//! ### Example
//! ```no_run
//! # use ziparchive::{WriteOptions, WriteSession};
//! # use ziparchive::error::Result;
//! #
//! fn run() -> Result<()> {
//!     let mut session = WriteSession::new();
//!     session.open("./foo.zip", WriteOptions::new().password("hunter2"))?;
//!
//!     session.add_data("hello.txt", b"Hello, world!")?;
//!     session.add_file("./Cargo.toml", "Cargo.toml")?;
//!
//!     let listing = session.finalize()?;
//!     assert_eq!(listing.len(), 2);
//!     Ok(())
//! }
//! ```

use crate::base::write::ZipFileWriter;
use crate::date::ZipDateTime;
use crate::entry::builder::ZipEntryBuilder;
use crate::entry::ZipEntry;
use crate::error::{ErrorKind, Result, ZipError};
use crate::file::ZipFile;
use crate::fs::{FileSystem, StdFileSystem};
use crate::opts::WriteOptions;
use crate::session::SessionState;
use crate::spec::compression::Compression;

use std::io::Read;
use std::path::{Path, PathBuf};

/// The permissions given to directory entries added without any.
const DEFAULT_DIR_PERMISSIONS: u16 = 0o755;

enum WriteState<W> {
    Unopened,
    Open(ZipFileWriter<W>),
    Finalized,
    Aborted,
}

/// A write session: `Unopened -> Open -> Finalized`, or `Open -> Aborted` if an entry fails part way through.
pub struct WriteSession<F: FileSystem = StdFileSystem> {
    fs: F,
    state: WriteState<F::Writer>,
    options: WriteOptions,
    path: PathBuf,
}

impl WriteSession<StdFileSystem> {
    /// Constructs an unopened session over the local filesystem.
    pub fn new() -> Self {
        Self::with_filesystem(StdFileSystem)
    }
}

impl Default for WriteSession<StdFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> WriteSession<F> {
    /// Constructs an unopened session over the given filesystem.
    pub fn with_filesystem(fs: F) -> Self {
        Self { fs, state: WriteState::Unopened, options: WriteOptions::default(), path: PathBuf::new() }
    }

    /// Returns the session's current state.
    pub fn state(&self) -> SessionState {
        match self.state {
            WriteState::Unopened => SessionState::Unopened,
            WriteState::Open(_) => SessionState::Open,
            WriteState::Finalized => SessionState::Finalized,
            WriteState::Aborted => SessionState::Aborted,
        }
    }

    /// Opens the archive at the given path for writing.
    ///
    /// In append mode an existing archive's central directory is parsed, the file is truncated to where that
    /// directory started, and new entries are written from there. Otherwise, or if no archive exists yet, a new one
    /// is created. On failure the session remains unopened, and an existing archive is left as it was unless the
    /// truncation itself failed.
    #[tracing::instrument(skip(self, path, options), fields(path = %path.as_ref().display()))]
    pub fn open(&mut self, path: impl AsRef<Path>, options: WriteOptions) -> Result<()> {
        match self.state {
            WriteState::Unopened => (),
            WriteState::Open(_) => return Err(ZipError::InvalidState("open")),
            WriteState::Finalized | WriteState::Aborted => return Err(ZipError::SessionClosed),
        }

        let path = path.as_ref();
        let append = options.append && self.fs.exists(path);
        let mut writer = match append {
            true => ZipFileWriter::append(self.fs.open_for_append(path)?)?,
            false => ZipFileWriter::new(self.fs.create(path)?),
        };

        writer = writer.with_encoding(options.encoding);
        if let Some(password) = &options.password {
            writer = writer.with_password(password);
        }
        if let Some(comment) = &options.comment {
            writer.comment(comment)?;
        }

        // Nothing above writes, so an existing archive is untouched until every option has been accepted.
        if append {
            let offset = writer.offset();
            self.fs.truncate(writer.inner_mut(), offset)?;
        }

        tracing::debug!(append = options.append, existing = writer.len(), "opened archive for writing");

        self.state = WriteState::Open(writer);
        self.options = options;
        self.path = path.to_path_buf();
        Ok(())
    }

    /// Appends an entry holding the given bytes, named with the session's compression options and the current time.
    pub fn add_data(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let entry = self.entry_builder(name).last_modification_date(ZipDateTime::now());
        self.add_entry(entry, data)
    }

    /// Appends an entry holding the given bytes with an explicit modification time and Unix permissions.
    pub fn add_data_with_attributes(
        &mut self,
        name: &str,
        data: &[u8],
        modified: ZipDateTime,
        permissions: Option<u16>,
    ) -> Result<()> {
        let mut entry = self.entry_builder(name).last_modification_date(modified);
        if let Some(mode) = permissions {
            entry = entry.unix_permissions(mode);
        }

        self.add_entry(entry, data)
    }

    /// Appends a fully described entry holding the given bytes.
    ///
    /// The entry's CRC and sizes are known upfront, so they're written in the local file header and no data
    /// descriptor follows the data.
    pub fn add_entry<E: Into<ZipEntry>>(&mut self, entry: E, data: &[u8]) -> Result<()> {
        let entry = entry.into();
        tracing::debug!(filename = entry.filename(), size = data.len(), "appending entry");

        self.with_writer(|writer| writer.write_entry_whole(entry, data))
    }

    /// Appends a directory entry. A trailing `/` is added to the name if missing.
    pub fn add_directory(&mut self, name: &str) -> Result<()> {
        let name = match name.ends_with('/') {
            true => name.to_string(),
            false => format!("{name}/"),
        };

        let entry = ZipEntryBuilder::new(name, Compression::Stored).unix_permissions(DEFAULT_DIR_PERMISSIONS);
        self.add_entry(entry, &[])
    }

    /// Appends an entry streamed from the given reader.
    ///
    /// As the size isn't known upfront, the CRC and sizes are written in a data descriptor following the data.
    pub fn add_reader<R: Read>(&mut self, name: &str, reader: &mut R) -> Result<()> {
        let entry = self.entry_builder(name).last_modification_date(ZipDateTime::now());
        self.add_entry_from_reader(entry.build(), reader)
    }

    /// Appends the file or directory at the given path under a new name.
    ///
    /// The entry takes its modification time and permissions from the file's attributes. File contents are streamed,
    /// so the CRC and sizes are written in a data descriptor following the data.
    #[tracing::instrument(skip(self, source), fields(source = %source.as_ref().display()))]
    pub fn add_file(&mut self, source: impl AsRef<Path>, name: &str) -> Result<()> {
        self.ensure_open()?;

        let source = source.as_ref();
        let attributes = self.fs.attributes(source)?;

        if attributes.is_dir {
            return self.add_directory(name);
        }

        let mut entry = self.entry_builder(name);
        if let Some(modified) = attributes.modified {
            entry = entry.last_modification_date(ZipDateTime::from(modified));
        }
        if let Some(mode) = attributes.permissions {
            entry = entry.unix_permissions(mode as u16);
        }

        let mut reader = self.fs.open(source)?;
        self.add_entry_from_reader(entry.build(), &mut reader)
    }

    /// Returns the number of entries in the archive, including any carried over when appending.
    pub fn len(&self) -> Result<usize> {
        match &self.state {
            WriteState::Open(writer) => Ok(writer.len()),
            WriteState::Unopened => Err(ZipError::InvalidState("unopened")),
            WriteState::Finalized | WriteState::Aborted => Err(ZipError::SessionClosed),
        }
    }

    /// Returns a snapshot of the directory written so far.
    pub fn list(&self) -> Result<ZipFile> {
        match &self.state {
            WriteState::Open(writer) => writer.directory(),
            WriteState::Unopened => Err(ZipError::InvalidState("unopened")),
            WriteState::Finalized | WriteState::Aborted => Err(ZipError::SessionClosed),
        }
    }

    /// Writes the central directory, closes the archive, and returns its final listing.
    ///
    /// Only an open session can be finalized. A failure while writing the directory aborts the session.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub fn finalize(&mut self) -> Result<ZipFile> {
        let writer = match std::mem::replace(&mut self.state, WriteState::Aborted) {
            WriteState::Open(writer) => writer,
            WriteState::Unopened => {
                self.state = WriteState::Unopened;
                return Err(ZipError::InvalidState("unopened"));
            }
            previous @ (WriteState::Finalized | WriteState::Aborted) => {
                let state = if matches!(previous, WriteState::Finalized) { "finalized" } else { "aborted" };
                self.state = previous;
                return Err(ZipError::InvalidState(state));
            }
        };

        let listing = writer.directory();
        writer.close()?;
        self.state = WriteState::Finalized;

        let listing = listing?;
        tracing::debug!(entries = listing.len(), "finalized archive");
        Ok(listing)
    }

    /// Releases the archive without writing a central directory, leaving it unreadable.
    pub fn abort(&mut self) {
        if let WriteState::Open(_) = std::mem::replace(&mut self.state, WriteState::Aborted) {
            tracing::warn!(path = %self.path.display(), "aborted archive without a central directory");
        }
    }

    fn entry_builder(&self, name: &str) -> ZipEntryBuilder {
        ZipEntryBuilder::new(name.to_string(), self.options.compression).compression_level(self.options.level)
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            WriteState::Open(_) => Ok(()),
            WriteState::Unopened => Err(ZipError::InvalidState("unopened")),
            WriteState::Finalized | WriteState::Aborted => Err(ZipError::SessionClosed),
        }
    }

    fn add_entry_from_reader<R: Read>(&mut self, entry: ZipEntry, reader: &mut R) -> Result<()> {
        tracing::debug!(filename = entry.filename(), "appending streamed entry");
        self.with_writer(|writer| writer.write_entry_from_reader(entry, reader))
    }

    /// Runs a write against the open writer, aborting the session if it fails after the archive was touched.
    ///
    /// Failures detected before any byte is written (eg. an unencodable name) leave the session open.
    fn with_writer<T>(&mut self, write: impl FnOnce(&mut ZipFileWriter<F::Writer>) -> Result<T>) -> Result<T> {
        let writer = match &mut self.state {
            WriteState::Open(writer) => writer,
            WriteState::Unopened => return Err(ZipError::InvalidState("unopened")),
            WriteState::Finalized | WriteState::Aborted => return Err(ZipError::SessionClosed),
        };

        let offset = writer.offset();
        let result = write(writer);

        if let Err(err) = &result {
            if writer.offset() != offset || err.kind() == ErrorKind::IoFailure {
                tracing::warn!(path = %self.path.display(), error = %err, "entry failed part way through, aborting");
                self.state = WriteState::Aborted;
            }
        }

        result
    }
}

impl<F: FileSystem> Drop for WriteSession<F> {
    fn drop(&mut self) {
        if let WriteState::Open(_) = self.state {
            tracing::warn!(path = %self.path.display(), "write session dropped without being finalized");
        }
    }
}
