// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! The filesystem boundary sessions read archives from and extract entries to.

use std::fs::{File, OpenOptions};
use std::io::{Read, Result, Seek, Write};
use std::path::Path;
use std::time::SystemTime;

/// The attributes of a path used to populate entries added from the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAttributes {
    pub size: u64,
    pub modified: Option<SystemTime>,
    pub is_dir: bool,
    /// Unix permission bits, where the platform has them.
    pub permissions: Option<u32>,
}

/// Byte storage and metadata operations needed by the write and read sessions.
pub trait FileSystem {
    type Reader: Read + Seek;
    type Writer: Read + Write + Seek;

    /// Opens an existing file for reading.
    fn open(&self, path: &Path) -> Result<Self::Reader>;

    /// Creates a file for writing, truncating it if it exists.
    fn create(&self, path: &Path) -> Result<Self::Writer>;

    /// Opens an existing file for reading and writing without truncating it.
    fn open_for_append(&self, path: &Path) -> Result<Self::Writer>;

    /// Truncates or extends an open file to the given length.
    fn truncate(&self, file: &mut Self::Writer, length: u64) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    fn attributes(&self, path: &Path) -> Result<FileAttributes>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Writes a whole file, replacing any existing contents.
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;

    fn set_modified(&self, path: &Path, time: SystemTime) -> Result<()>;

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;
}

/// The local filesystem, via [`std::fs`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    type Reader = File;
    type Writer = File;

    fn open(&self, path: &Path) -> Result<File> {
        File::open(path)
    }

    fn create(&self, path: &Path) -> Result<File> {
        OpenOptions::new().read(true).write(true).create(true).truncate(true).open(path)
    }

    fn open_for_append(&self, path: &Path) -> Result<File> {
        OpenOptions::new().read(true).write(true).open(path)
    }

    fn truncate(&self, file: &mut File, length: u64) -> Result<()> {
        file.set_len(length)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn attributes(&self, path: &Path) -> Result<FileAttributes> {
        let metadata = std::fs::metadata(path)?;

        #[cfg(unix)]
        let permissions = {
            use std::os::unix::fs::PermissionsExt;
            Some(metadata.permissions().mode() & 0o7777)
        };
        #[cfg(not(unix))]
        let permissions = None;

        Ok(FileAttributes {
            size: metadata.len(),
            modified: metadata.modified().ok(),
            is_dir: metadata.is_dir(),
            permissions,
        })
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(data)?;
        file.flush()
    }

    fn set_modified(&self, path: &Path, time: SystemTime) -> Result<()> {
        // Directories can't be opened for writing, but a read handle is enough to set times on them.
        let file = match path.is_dir() {
            true => File::open(path)?,
            false => OpenOptions::new().write(true).open(path)?,
        };

        file.set_modified(time)
    }

    #[cfg(unix)]
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
    }

    #[cfg(not(unix))]
    fn set_permissions(&self, _path: &Path, _mode: u32) -> Result<()> {
        Ok(())
    }
}
