// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub(crate) mod read;
pub(crate) mod spec;
pub(crate) mod write;

use crate::base::read::seek::ZipFileReader;
use crate::base::write::ZipFileWriter;
use crate::error::ErrorKind;
use crate::spec::compression::Compression;
use crate::ZipEntryBuilder;

use std::io::{Cursor, Write};

const DATA: &str = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do eiusmod tempor incididunt...";

/// Writes a single whole entry named `foo.bar` and returns the archive's bytes.
pub(crate) fn single_entry_archive(compression: Compression, password: Option<&str>) -> Vec<u8> {
    let mut writer = ZipFileWriter::new(Cursor::new(Vec::new()));
    if let Some(password) = password {
        writer = writer.with_password(password);
    }

    let opts = ZipEntryBuilder::new("foo.bar".to_string(), compression);
    writer.write_entry_whole(opts, DATA.as_bytes()).expect("failed to write entry");
    writer.close().expect("failed to close writer").into_inner()
}

#[test]
fn empty() {
    let zip_writer = ZipFileWriter::new(Cursor::new(Vec::<u8>::new()));
    let data = zip_writer.close().expect("failed to close writer").into_inner();
    assert_eq!(data.len(), 22);

    let zip_reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");
    assert!(zip_reader.file().is_empty());
}

#[test]
fn zero_length_zip() {
    let zip_reader_res = ZipFileReader::new(Cursor::new(Vec::<u8>::new()));
    let err = zip_reader_res.err().expect("opened an empty source");
    assert_eq!(err.kind(), ErrorKind::CorruptData);
}

#[test]
fn single_entry_no_data() {
    let mut zip_writer = ZipFileWriter::new(Cursor::new(Vec::<u8>::new()));
    let opts = ZipEntryBuilder::new("foo.bar".to_string(), Compression::Stored);

    zip_writer.write_entry_whole(opts, &[]).expect("failed to write entry");
    let data = zip_writer.close().expect("failed to close writer").into_inner();

    let mut zip_reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");

    assert_eq!(1, zip_reader.file().len());
    let entry = zip_reader.file().entry("foo.bar").expect("no 'foo.bar' entry");
    assert_eq!(0, entry.header_offset());
    assert_eq!(0, entry.compressed_size());
    assert_eq!(0, entry.uncompressed_size());
    assert_eq!(Compression::Stored, entry.compression());

    assert!(zip_reader.read_entry(0).expect("failed to read entry").is_empty());
}

macro_rules! single_entry_gen {
    ($name:ident, $typ:expr, $password:expr) => {
        #[test]
        fn $name() {
            let password: Option<&str> = $password;
            let data = single_entry_archive($typ, password);
            let mut zip_reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");

            assert_eq!(1, zip_reader.file().len());

            let entry = zip_reader.file().entry("foo.bar").expect("no 'foo.bar' entry");
            assert_eq!(DATA.len() as u64, entry.uncompressed_size());
            assert_eq!($typ, entry.compression());
            assert_eq!(password.is_some(), entry.encrypted());
            assert!(!entry.data_descriptor());

            let buffer = zip_reader
                .read_entry_with_password(0, password.map(str::as_bytes))
                .expect("failed to read entry");

            assert_eq!(DATA.as_bytes(), buffer);
        }
    };
}

single_entry_gen!(single_entry_stored, Compression::Stored, None);
single_entry_gen!(single_entry_deflate, Compression::Deflate, None);
single_entry_gen!(single_entry_stored_encrypted, Compression::Stored, Some("hunter2"));
single_entry_gen!(single_entry_deflate_encrypted, Compression::Deflate, Some("hunter2"));

#[test]
fn stream_entry_uses_descriptor() {
    for password in [None, Some("hunter2")] {
        let mut writer = ZipFileWriter::new(Cursor::new(Vec::new()));
        if let Some(password) = password {
            writer = writer.with_password(password);
        }

        let opts = ZipEntryBuilder::new("stream.txt".to_string(), Compression::Deflate);
        let mut entry_writer = writer.write_entry_stream(opts).expect("failed to open entry");
        for chunk in DATA.as_bytes().chunks(7) {
            entry_writer.write_all(chunk).expect("failed to write chunk");
        }
        entry_writer.close().expect("failed to close entry");

        let data = writer.close().expect("failed to close writer").into_inner();
        let mut reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");

        let entry = reader.file().entry("stream.txt").expect("no 'stream.txt' entry");
        assert!(entry.data_descriptor());
        assert_eq!(entry.crc32(), crate::codec::crc32(DATA.as_bytes()));
        assert_eq!(entry.uncompressed_size(), DATA.len() as u64);

        let read = reader.read_entry_with_password(0, password.map(str::as_bytes)).expect("failed to read entry");
        assert_eq!(read, DATA.as_bytes());
    }
}

#[test]
fn level_none_forces_stored() {
    let mut writer = ZipFileWriter::new(Cursor::new(Vec::new()));
    let opts = ZipEntryBuilder::new("foo.bar".to_string(), Compression::Deflate)
        .compression_level(crate::CompressionLevel::None);

    writer.write_entry_whole(opts, DATA.as_bytes()).expect("failed to write entry");
    let data = writer.close().expect("failed to close writer").into_inner();

    let reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");
    let entry = reader.file().entry("foo.bar").expect("no 'foo.bar' entry");
    assert_eq!(entry.compression(), Compression::Stored);
    assert_eq!(entry.compressed_size(), DATA.len() as u64);
}

#[test]
fn missing_password_is_reported() {
    let data = single_entry_archive(Compression::Deflate, Some("hunter2"));
    let mut reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");

    let err = reader.read_entry(0).expect_err("read an encrypted entry without a password");
    assert_eq!(err.kind(), ErrorKind::InvalidPassword);
}

#[test]
fn wrong_password_is_reported() {
    let data = single_entry_archive(Compression::Stored, Some("hunter2"));
    let mut reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");

    let err = reader.read_entry_with_password(0, Some(b"wrong")).expect_err("read with the wrong password");
    assert_eq!(err.kind(), ErrorKind::InvalidPassword);
}

#[test]
fn wrong_password_is_never_a_corrupt_stream() {
    let data = single_entry_archive(Compression::Deflate, Some("hunter2"));
    let mut reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");

    // Enough attempts that some pass the one-byte header check and reach the inflater.
    for i in 0..2000 {
        let password = format!("wrong{i}");
        let err =
            reader.read_entry_with_password(0, Some(password.as_bytes())).expect_err("read with a wrong password");
        assert!(matches!(err, crate::error::ZipError::InvalidPassword(_)), "password {password}: {err}");
    }
}

#[test]
fn truncated_archive_is_corrupt() {
    let mut data = single_entry_archive(Compression::Deflate, None);
    data.pop();

    let err = ZipFileReader::new(Cursor::new(data)).err().expect("opened a truncated archive");
    assert_eq!(err.kind(), ErrorKind::CorruptData);
}

#[test]
fn altered_payload_fails_checksum() {
    let mut data = single_entry_archive(Compression::Stored, None);

    // Stored data starts straight after the 30 byte header and the 7 byte name.
    data[30 + 7] ^= 0xFF;

    let mut reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");
    let err = reader.read_entry(0).expect_err("read an altered entry");
    assert_eq!(err.kind(), ErrorKind::ChecksumMismatch);
}

#[test]
fn unsupported_method_is_rejected_on_open() {
    let mut data = single_entry_archive(Compression::Stored, None);

    // The central directory record follows the only entry. Its method sits 10 bytes in.
    let cdr_offset = 30 + 7 + DATA.len();
    data[cdr_offset + 10] = 12;

    let err = ZipFileReader::new(Cursor::new(data)).err().expect("opened an archive using bzip2");
    assert!(matches!(err, crate::error::ZipError::CompressionNotSupported(12)));
}

#[test]
fn index_out_of_bounds() {
    let data = single_entry_archive(Compression::Stored, None);
    let mut reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");

    let err = reader.read_entry(1).expect_err("read past the last entry");
    assert_eq!(err.kind(), ErrorKind::InvalidState);
}

#[test]
fn comments_and_directories() {
    let mut writer = ZipFileWriter::new(Cursor::new(Vec::new()));
    writer.comment("archive comment").expect("failed to set comment");

    let dir = ZipEntryBuilder::new("dir/".to_string(), Compression::Stored).unix_permissions(0o755);
    writer.write_entry_whole(dir, &[]).expect("failed to write directory");

    let file = ZipEntryBuilder::new("dir/foo.txt".to_string(), Compression::Deflate)
        .comment("entry comment".to_string())
        .unix_permissions(0o644);
    writer.write_entry_whole(file, DATA.as_bytes()).expect("failed to write entry");

    let data = writer.close().expect("failed to close writer").into_inner();
    let reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");

    assert_eq!(reader.file().comment(), "archive comment");

    let dir = &reader.file().entries()[0];
    assert!(dir.dir());
    assert_eq!(dir.unix_permissions(), Some(0o755));

    let file = &reader.file().entries()[1];
    assert!(!file.dir());
    assert_eq!(file.comment(), "entry comment");
    assert_eq!(file.unix_permissions(), Some(0o644));
}

#[test]
fn legacy_encoding_round_trip() {
    let gbk = crate::NameEncoding::for_label("gbk").expect("gbk label");
    let name = "\u{4E2D}\u{6587}.txt";

    let mut writer = ZipFileWriter::new(Cursor::new(Vec::new())).with_encoding(gbk);
    let opts = ZipEntryBuilder::new(name.to_string(), Compression::Stored);
    writer.write_entry_whole(opts, DATA.as_bytes()).expect("failed to write entry");
    let data = writer.close().expect("failed to close writer").into_inner();

    let reader = ZipFileReader::with_encoding(Cursor::new(data.clone()), gbk).expect("failed to open reader");
    assert!(reader.file().entry(name).is_some());

    // Without the flag a UTF-8 reader can't recover the name.
    let reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");
    assert!(reader.file().entry(name).is_none());
}

#[test]
fn unicode_name_sets_flag() {
    let name = "\u{4E2D}\u{6587}.txt";

    let mut writer = ZipFileWriter::new(Cursor::new(Vec::new()));
    let opts = ZipEntryBuilder::new(name.to_string(), Compression::Stored);
    writer.write_entry_whole(opts, DATA.as_bytes()).expect("failed to write entry");
    let data = writer.close().expect("failed to close writer").into_inner();

    // Flagged names are decoded as UTF-8 whatever the reader's encoding.
    let gbk = crate::NameEncoding::for_label("gbk").expect("gbk label");
    let reader = ZipFileReader::with_encoding(Cursor::new(data), gbk).expect("failed to open reader");
    assert!(reader.file().entry(name).is_some());
}
