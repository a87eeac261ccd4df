// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::seek::ZipFileReader;
use crate::base::write::ZipFileWriter;
use crate::error::{ErrorKind, ZipError};
use crate::spec::compression::Compression;
use crate::ZipEntryBuilder;

use std::io::Cursor;

/// Writes two stored entries and returns the archive alongside the offset of its EOCDR.
fn two_entry_archive() -> (Vec<u8>, usize) {
    let mut writer = ZipFileWriter::new(Vec::new());

    for name in ["a.txt", "b.txt"] {
        let opts = ZipEntryBuilder::new(name.to_string(), Compression::Stored);
        writer.write_entry_whole(opts, name.as_bytes()).expect("failed to write entry");
    }

    let data = writer.close().expect("failed to close writer");
    let eocdr_offset = data.len() - 22;
    (data, eocdr_offset)
}

#[test]
fn declared_count_must_match() {
    let (mut data, eocdr_offset) = two_entry_archive();

    // Both entry counts, so the archive isn't mistaken for a split one.
    data[eocdr_offset + 8] = 3;
    data[eocdr_offset + 10] = 3;

    let err = ZipFileReader::new(Cursor::new(data)).err().expect("opened with a mismatched count");
    assert!(matches!(err, ZipError::EntryCountMismatch { expected: 3, actual: 2 }));
    assert_eq!(err.kind(), ErrorKind::CorruptData);
}

#[test]
fn directory_must_precede_eocdr() {
    let (mut data, eocdr_offset) = two_entry_archive();

    // Grow the declared directory size past the EOCDR.
    data[eocdr_offset + 12] = data[eocdr_offset + 12].wrapping_add(1);
    data[eocdr_offset + 13] = data[eocdr_offset + 13].wrapping_add(1);

    let err = ZipFileReader::new(Cursor::new(data)).err().expect("opened with an overlong directory");
    assert!(matches!(err, ZipError::DirectoryOutOfBounds));
}

#[test]
fn zip64_markers_are_rejected() {
    let (mut data, eocdr_offset) = two_entry_archive();
    data[eocdr_offset + 16..eocdr_offset + 20].copy_from_slice(&[0xFF; 4]);

    let err = ZipFileReader::new(Cursor::new(data)).err().expect("opened a ZIP64 marked archive");
    assert!(matches!(err, ZipError::Zip64Needed));
}

#[test]
fn split_archives_are_rejected() {
    let (mut data, eocdr_offset) = two_entry_archive();
    data[eocdr_offset + 4] = 1;

    let err = ZipFileReader::new(Cursor::new(data)).err().expect("opened a split archive");
    assert!(matches!(err, ZipError::FeatureNotSupported(_)));
}

#[test]
fn oversized_entry_is_rejected_on_open() {
    let (mut data, _) = two_entry_archive();

    // Each entry is a 30 byte header, a 5 byte name, and 5 bytes of data, so the directory starts at 80. The first
    // record's compressed size sits 20 bytes in.
    data[80 + 20..80 + 24].copy_from_slice(&0xFFFF_FFF0u32.to_le_bytes());

    let err = ZipFileReader::new(Cursor::new(data)).err().expect("opened an entry overrunning the directory");
    assert!(matches!(err, ZipError::EntryOutOfBounds(ref name) if name == "a.txt"));
    assert_eq!(err.kind(), ErrorKind::CorruptData);
}

#[test]
fn entries_keep_directory_order() {
    let (data, _) = two_entry_archive();
    let mut reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");

    let names: Vec<_> = reader.file().entries().iter().map(|entry| entry.filename().to_string()).collect();
    assert_eq!(names, ["a.txt", "b.txt"]);

    assert_eq!(reader.file().index_of("b.txt"), Some(1));
    assert_eq!(reader.read_entry(1).expect("failed to read entry"), b"b.txt");
}

#[test]
fn descriptor_must_match_directory() {
    use std::io::Write;

    let mut writer = ZipFileWriter::new(Vec::new());
    let opts = ZipEntryBuilder::new("stream.txt".to_string(), Compression::Stored);
    let mut entry_writer = writer.write_entry_stream(opts).expect("failed to open entry");
    entry_writer.write_all(b"streamed").expect("failed to write data");
    entry_writer.close().expect("failed to close entry");
    let mut data = writer.close().expect("failed to close writer");

    // The descriptor follows the 30 byte header, 10 byte name and 8 bytes of data. Alter its uncompressed size.
    let descriptor_offset = 30 + 10 + 8;
    assert_eq!(&data[descriptor_offset..descriptor_offset + 4], &[0x50, 0x4b, 0x07, 0x08]);
    data[descriptor_offset + 12] = 9;

    let mut reader = ZipFileReader::new(Cursor::new(data)).expect("failed to open reader");
    let err = reader.read_entry(0).expect_err("read with a mismatched descriptor");
    assert!(matches!(err, ZipError::DescriptorMismatch(_)));
}
