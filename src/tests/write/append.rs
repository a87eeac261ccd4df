// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::read::seek::ZipFileReader;
use crate::base::write::ZipFileWriter;
use crate::spec::compression::Compression;
use crate::ZipEntryBuilder;

use std::io::Cursor;

fn write_entries(writer: &mut ZipFileWriter<Cursor<Vec<u8>>>, names: &[&str]) {
    for name in names {
        let opts = ZipEntryBuilder::new(name.to_string(), Compression::Deflate);
        writer.write_entry_whole(opts, name.repeat(10).as_bytes()).expect("failed to write entry");
    }
}

#[test]
fn append_preserves_prior_entries() {
    let mut writer = ZipFileWriter::new(Cursor::new(Vec::new()));
    writer.comment("first").expect("failed to set comment");
    write_entries(&mut writer, &["a.txt", "b.txt"]);
    let archive = writer.close().expect("failed to close writer");

    let before = ZipFileReader::new(archive.clone()).expect("failed to open reader").file().clone();

    let mut writer = ZipFileWriter::append(archive).expect("failed to open for appending");
    assert_eq!(writer.len(), 2);
    write_entries(&mut writer, &["c.txt"]);
    let archive = writer.close().expect("failed to close writer");

    let mut reader = ZipFileReader::new(archive).expect("failed to open reader");
    let names: Vec<_> = reader.file().entries().iter().map(|entry| entry.filename().to_string()).collect();
    assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    assert_eq!(reader.file().comment(), "first");

    for (old, new) in before.entries().iter().zip(reader.file().entries()) {
        assert_eq!(old.crc32(), new.crc32());
        assert_eq!(old.compressed_size(), new.compressed_size());
        assert_eq!(old.header_offset(), new.header_offset());
    }

    for (index, name) in ["a.txt", "b.txt", "c.txt"].iter().enumerate() {
        assert_eq!(reader.read_entry(index).expect("failed to read entry"), name.repeat(10).as_bytes());
    }
}

#[test]
fn append_starts_at_directory() {
    let mut writer = ZipFileWriter::new(Cursor::new(Vec::new()));
    write_entries(&mut writer, &["a.txt"]);
    let archive = writer.close().expect("failed to close writer");

    let directory = crate::core::cd::read(&mut archive.clone()).expect("failed to read directory");
    let writer = ZipFileWriter::append(archive).expect("failed to open for appending");

    assert_eq!(writer.offset(), directory.offset());
}
