// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::write::io::offset::OffsetWriter;

use std::io::{Cursor, Write};

#[test]
fn basic() {
    let mut writer = OffsetWriter::new(Cursor::new(Vec::new()));
    assert_eq!(writer.offset(), 0);

    writer.write_all(b"Foo. Bar. Foo. Bar.").expect("failed to write data");
    assert_eq!(writer.offset(), 19);

    writer.write_all(b"Foo. Foo.").expect("failed to write data");
    assert_eq!(writer.offset(), 28);

    writer.write_all(b"Bar. Bar.").expect("failed to write data");
    assert_eq!(writer.offset(), 37);
}

#[test]
fn starts_from_known_offset() {
    let mut writer = OffsetWriter::with_offset(Vec::new(), 100);
    writer.write_all(b"Foo.").expect("failed to write data");

    assert_eq!(writer.offset(), 104);
    assert_eq!(writer.into_inner(), b"Foo.");
}
