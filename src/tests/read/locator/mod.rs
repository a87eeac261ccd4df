// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::write::ZipFileWriter;
use crate::core::eocdr::{locate, reverse_search_buffer};
use crate::error::ZipError;

use std::io::Cursor;

fn empty_archive(comment: &str) -> Vec<u8> {
    let mut writer = ZipFileWriter::new(Vec::new());
    writer.comment(comment).expect("failed to set comment");
    writer.close().expect("failed to close writer")
}

#[test]
fn search_one_byte_test() {
    let buffer: &[u8] = &[0x0, 0x0, 0x0, 0x0, 0x0, 0x0];
    let signature: &[u8] = &[0x1];

    let matched = reverse_search_buffer(buffer, signature);
    assert!(matched.is_none());

    let buffer: &[u8] = &[0x2, 0x1, 0x0, 0x0, 0x0, 0x0];
    let signature: &[u8] = &[0x1];

    let matched = reverse_search_buffer(buffer, signature);
    assert_eq!(Some(1), matched);
}

#[test]
fn search_two_byte_test() {
    let buffer: &[u8] = &[0x2, 0x1, 0x0, 0x0, 0x0, 0x0];
    let signature: &[u8] = &[0x2, 0x1];

    let matched = reverse_search_buffer(buffer, signature);
    assert_eq!(Some(1), matched);
}

#[test]
fn search_prefers_last_match() {
    let buffer: &[u8] = &[0x2, 0x1, 0x2, 0x1, 0x0];
    let signature: &[u8] = &[0x2, 0x1];

    assert_eq!(Some(3), reverse_search_buffer(buffer, signature));
    assert_eq!(Some(1), reverse_search_buffer(&buffer[..3], signature));
}

#[test]
fn locator_empty_test() {
    let data = empty_archive("");
    assert_eq!(data.len(), 22);

    let eocdr = locate(&mut Cursor::new(data)).expect("failed to locate eocdr");
    assert_eq!(eocdr, 0);
}

#[test]
fn locator_empty_max_comment_test() {
    let comment = "a".repeat(u16::MAX as usize);
    let data = empty_archive(&comment);

    let eocdr = locate(&mut Cursor::new(data)).expect("failed to locate eocdr");
    assert_eq!(eocdr, 0);
}

#[test]
fn locator_comment_holding_signature_test() {
    let data = empty_archive("PK\u{5}\u{6} is the end of central directory signature");

    let eocdr = locate(&mut Cursor::new(data)).expect("failed to locate eocdr");
    assert_eq!(eocdr, 0);
}

#[test]
fn locator_truncated_comment_test() {
    let mut data = empty_archive("a comment which loses its last byte");
    data.pop();

    let err = locate(&mut Cursor::new(data)).expect_err("located a truncated eocdr");
    assert!(matches!(err, ZipError::UnableToLocateEOCDR));
}

#[test]
fn locator_short_source_test() {
    let err = locate(&mut Cursor::new(vec![0x50, 0x4b, 0x05, 0x06])).expect_err("located within 4 bytes");
    assert!(matches!(err, ZipError::UnableToLocateEOCDR));
}
