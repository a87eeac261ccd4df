// Copyright (c) 2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use ziparchive::{ReadOptions, ReadSession, WriteOptions, WriteSession};

pub const FILE_LIST: &[(&str, &str)] = &[
    ("sample_data/alpha/back_to_front.txt", "zyxwvutsrqponmlkjihgfedcba"),
    ("sample_data/alpha/front_to_back.txt", "abcdefghijklmnopqrstuvwxyz"),
    ("sample_data/numeric/forward.txt", "0123456789"),
    ("sample_data/numeric/reverse.txt", "9876543210"),
];

/// Routes the crate's tracing output through `env_logger` for the duration of the test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Writes every file in [`FILE_LIST`] to a new archive at the given path.
pub fn write_sample_archive(path: &Path, options: WriteOptions) {
    let mut session = WriteSession::new();
    session.open(path, options).expect("failed to open write session");

    for (name, content) in FILE_LIST {
        session.add_data(name, content.repeat(64).as_bytes()).expect("failed to add entry");
    }

    let listing = session.finalize().expect("failed to finalize archive");
    assert_eq!(listing.len(), FILE_LIST.len());
}

/// Returns the content stored for an entry of [`FILE_LIST`].
pub fn sample_content(name: &str) -> Vec<u8> {
    let (_, content) = FILE_LIST.iter().find(|(entry, _)| *entry == name).expect("not a sample entry");
    content.repeat(64).into_bytes()
}

pub fn open_reader(path: &Path, options: ReadOptions) -> ReadSession {
    let mut session = ReadSession::new();
    session.open(path, options).expect("failed to open read session");
    session
}

pub fn archive_path(dir: &Path) -> PathBuf {
    dir.join("archive.zip")
}
