// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A session which lists and extracts an archive on a [`FileSystem`].
//!
//! ### Example
//! ```no_run
//! # use ziparchive::{ExtractOptions, ExtractPolicy, ReadOptions, ReadSession};
//! # use ziparchive::error::Result;
//! #
//! fn run() -> Result<()> {
//!     let mut session = ReadSession::new();
//!     session.open("./foo.zip", ReadOptions::new().password("hunter2"))?;
//!
//!     let policy = ExtractPolicy::new()
//!         .on_overwrite(|_existing| false)
//!         .on_progress(|progress| println!("{}%", progress.percentage));
//!
//!     let report = session.extract_all("./out", policy, &ExtractOptions::new())?;
//!     for failure in &report.failed {
//!         eprintln!("{}: {}", failure.name, failure.error);
//!     }
//!
//!     session.close()
//! }
//! ```

use crate::base::read::seek::ZipFileReader;
use crate::entry::StoredZipEntry;
use crate::error::{Result, ZipError};
use crate::file::ZipFile;
use crate::fs::{FileSystem, StdFileSystem};
use crate::opts::{ExtractOptions, ReadOptions};
use crate::policy::{ExtractPolicy, Progress};
use crate::session::SessionState;

use std::path::{Component, Path, PathBuf};

enum ReadState<R> {
    Unopened,
    Open { reader: ZipFileReader<R>, password: Option<Vec<u8>> },
    Closed,
}

/// What happened to a single extracted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    Written(PathBuf),
    /// The destination existed and the policy declined to overwrite it.
    Skipped(PathBuf),
}

/// An entry which failed to extract, and why.
#[derive(Debug)]
pub struct ExtractFailure {
    pub name: String,
    pub error: ZipError,
}

/// The result of extracting all entries to a directory.
#[derive(Debug, Default)]
pub struct ExtractReport {
    /// Destination paths written, in directory order.
    pub extracted: Vec<PathBuf>,
    /// Destination paths left untouched by the overwrite policy.
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<ExtractFailure>,
    /// Entries written or skipped; failures aren't counted.
    pub processed: usize,
    pub total: usize,
}

impl ExtractReport {
    /// Returns whether every entry was written or skipped.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The result of extracting all file entries into memory.
#[derive(Debug, Default)]
pub struct MemoryReport {
    /// Entry names and their data, in directory order.
    pub entries: Vec<(String, Vec<u8>)>,
    pub failed: Vec<ExtractFailure>,
}

/// A read session: `Unopened -> Open -> Closed`.
///
/// A closed session can be opened again, and its listing then reflects the archive as of that open. Listings are
/// never refreshed implicitly.
pub struct ReadSession<F: FileSystem = StdFileSystem> {
    fs: F,
    state: ReadState<F::Reader>,
}

impl ReadSession<StdFileSystem> {
    /// Constructs an unopened session over the local filesystem.
    pub fn new() -> Self {
        Self::with_filesystem(StdFileSystem)
    }
}

impl Default for ReadSession<StdFileSystem> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> ReadSession<F> {
    /// Constructs an unopened session over the given filesystem.
    pub fn with_filesystem(fs: F) -> Self {
        Self { fs, state: ReadState::Unopened }
    }

    /// Returns the session's current state.
    pub fn state(&self) -> SessionState {
        match self.state {
            ReadState::Unopened => SessionState::Unopened,
            ReadState::Open { .. } => SessionState::Open,
            ReadState::Closed => SessionState::Closed,
        }
    }

    /// Opens the archive at the given path and parses its central directory.
    ///
    /// Any password is retained but not checked until an encrypted entry is extracted, as archives may mix encrypted
    /// and plain entries.
    #[tracing::instrument(skip(self, path, options), fields(path = %path.as_ref().display()))]
    pub fn open(&mut self, path: impl AsRef<Path>, options: ReadOptions) -> Result<()> {
        if let ReadState::Open { .. } = self.state {
            return Err(ZipError::InvalidState("open"));
        }

        let reader = ZipFileReader::with_encoding(self.fs.open(path.as_ref())?, options.encoding)?;
        tracing::debug!(entries = reader.file().len(), "opened archive for reading");

        self.state = ReadState::Open { reader, password: options.password };
        Ok(())
    }

    /// Returns a copy of the archive's directory as of when it was opened.
    pub fn list(&self) -> Result<ZipFile> {
        match &self.state {
            ReadState::Open { reader, .. } => Ok(reader.file().clone()),
            ReadState::Unopened => Err(ZipError::InvalidState("unopened")),
            ReadState::Closed => Err(ZipError::SessionClosed),
        }
    }

    /// Returns the number of entries in the archive.
    pub fn len(&self) -> Result<usize> {
        match &self.state {
            ReadState::Open { reader, .. } => Ok(reader.file().len()),
            ReadState::Unopened => Err(ZipError::InvalidState("unopened")),
            ReadState::Closed => Err(ZipError::SessionClosed),
        }
    }

    /// Reads and returns the data of the entry at the given index.
    pub fn read_entry(&mut self, index: usize) -> Result<Vec<u8>> {
        let (reader, password) = self.open_mut()?;
        reader.read_entry_with_password(index, password.as_deref())
    }

    /// Extracts the entry at the given index to exactly the given destination path.
    ///
    /// The entry is fully decoded first. If the destination then exists, the policy decides whether it's
    /// overwritten. Progress is reported once, as complete, when the entry is written or skipped.
    #[tracing::instrument(skip(self, destination, policy), fields(destination = %destination.as_ref().display()))]
    pub fn extract_entry(
        &mut self,
        index: usize,
        destination: impl AsRef<Path>,
        mut policy: ExtractPolicy<'_>,
        options: &ExtractOptions,
    ) -> Result<ExtractOutcome> {
        let fs = &self.fs;
        let (reader, password) = match &mut self.state {
            ReadState::Open { reader, password } => (reader, password.as_deref()),
            ReadState::Unopened => return Err(ZipError::InvalidState("unopened")),
            ReadState::Closed => return Err(ZipError::SessionClosed),
        };

        let outcome = extract(fs, reader, index, destination.as_ref(), password, &mut policy, options)?;
        policy.report(Progress::new(1, 1));

        Ok(outcome)
    }

    /// Extracts every entry beneath the given directory, in directory order.
    ///
    /// A failure to decode or write one entry is recorded in the report and extraction moves on to the next. Only a
    /// session in the wrong state, or a destination directory which can't be created, fails the whole call.
    #[tracing::instrument(skip(self, directory, policy), fields(directory = %directory.as_ref().display()))]
    pub fn extract_all(
        &mut self,
        directory: impl AsRef<Path>,
        mut policy: ExtractPolicy<'_>,
        options: &ExtractOptions,
    ) -> Result<ExtractReport> {
        let fs = &self.fs;
        let (reader, password) = match &mut self.state {
            ReadState::Open { reader, password } => (reader, password.as_deref()),
            ReadState::Unopened => return Err(ZipError::InvalidState("unopened")),
            ReadState::Closed => return Err(ZipError::SessionClosed),
        };

        let directory = directory.as_ref();
        fs.create_dir_all(directory)?;

        let entries = reader.file().entries().to_vec();
        let mut report = ExtractReport { total: entries.len(), ..Default::default() };

        for (index, entry) in entries.iter().enumerate() {
            let result = match destination(directory, entry) {
                Ok(path) => extract(fs, reader, index, &path, password, &mut policy, options),
                Err(error) => Err(error),
            };

            match result {
                Ok(ExtractOutcome::Written(path)) => report.extracted.push(path),
                Ok(ExtractOutcome::Skipped(path)) => {
                    tracing::warn!(filename = entry.filename(), "destination exists, skipped by policy");
                    report.skipped.push(path);
                }
                Err(error) => {
                    tracing::warn!(filename = entry.filename(), %error, "failed to extract entry");
                    report.failed.push(ExtractFailure { name: entry.filename().to_string(), error });
                    continue;
                }
            }

            report.processed += 1;
            policy.report(Progress::new(report.processed, report.total));
        }

        tracing::debug!(
            extracted = report.extracted.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "extracted archive"
        );

        Ok(report)
    }

    /// Reads every file entry into memory, in directory order. Directory entries are left out.
    ///
    /// As with [`ReadSession::extract_all()`], a failing entry is recorded and doesn't stop the others.
    pub fn extract_all_to_memory(&mut self) -> Result<MemoryReport> {
        let (reader, password) = self.open_mut()?;
        let entries = reader.file().entries().to_vec();
        let mut report = MemoryReport::default();

        for (index, entry) in entries.iter().enumerate().filter(|(_, entry)| !entry.dir()) {
            match reader.read_entry_with_password(index, password.as_deref()) {
                Ok(data) => report.entries.push((entry.filename().to_string(), data)),
                Err(error) => {
                    tracing::warn!(filename = entry.filename(), %error, "failed to read entry");
                    report.failed.push(ExtractFailure { name: entry.filename().to_string(), error });
                }
            }
        }

        Ok(report)
    }

    /// Releases the archive. Any further operation other than reopening fails.
    pub fn close(&mut self) -> Result<()> {
        match std::mem::replace(&mut self.state, ReadState::Closed) {
            ReadState::Open { .. } => {
                tracing::debug!("closed archive");
                Ok(())
            }
            ReadState::Unopened => {
                self.state = ReadState::Unopened;
                Err(ZipError::InvalidState("unopened"))
            }
            ReadState::Closed => Err(ZipError::SessionClosed),
        }
    }

    fn open_mut(&mut self) -> Result<(&mut ZipFileReader<F::Reader>, &Option<Vec<u8>>)> {
        match &mut self.state {
            ReadState::Open { reader, password } => Ok((reader, &*password)),
            ReadState::Unopened => Err(ZipError::InvalidState("unopened")),
            ReadState::Closed => Err(ZipError::SessionClosed),
        }
    }
}

/// Resolves where an entry is extracted to beneath a directory, rejecting names which would escape it.
fn destination(directory: &Path, entry: &StoredZipEntry) -> Result<PathBuf> {
    let mut path = directory.to_path_buf();
    let mut depth = 0;

    for component in Path::new(entry.filename()).components() {
        match component {
            Component::Normal(part) => {
                path.push(part);
                depth += 1;
            }
            Component::CurDir => (),
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ZipError::UnsafeEntryName(entry.filename().to_string()))
            }
        }
    }

    match depth {
        0 => Err(ZipError::UnsafeEntryName(entry.filename().to_string())),
        _ => Ok(path),
    }
}

/// Decodes one entry and writes it to the given path, consulting the policy if the path already exists.
fn extract<F: FileSystem>(
    fs: &F,
    reader: &mut ZipFileReader<F::Reader>,
    index: usize,
    path: &Path,
    password: Option<&[u8]>,
    policy: &mut ExtractPolicy<'_>,
    options: &ExtractOptions,
) -> Result<ExtractOutcome> {
    let entry = reader.file().entries().get(index).ok_or(ZipError::EntryIndexOutOfBounds)?.clone();

    if entry.dir() {
        fs.create_dir_all(path)?;
        return Ok(ExtractOutcome::Written(path.to_path_buf()));
    }

    let data = reader.read_entry_with_password(index, password)?;

    if fs.exists(path) && !options.overwrite && !policy.should_overwrite(path) {
        return Ok(ExtractOutcome::Skipped(path.to_path_buf()));
    }

    if let Some(parent) = path.parent() {
        fs.create_dir_all(parent)?;
    }
    fs.write_file(path, &data)?;

    // The data is already in place, so attribute failures are only logged.
    if options.restore_times {
        if let Some(time) = entry.last_modification_date().to_system_time() {
            if let Err(error) = fs.set_modified(path, time) {
                tracing::warn!(path = %path.display(), %error, "unable to restore modification time");
            }
        }
    }

    if options.restore_permissions {
        if let Some(mode) = entry.unix_permissions() {
            if let Err(error) = fs.set_permissions(path, mode) {
                tracing::warn!(path = %path.display(), %error, "unable to restore permissions");
            }
        }
    }

    Ok(ExtractOutcome::Written(path.to_path_buf()))
}
