// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

pub(crate) mod append;
pub(crate) mod offset;

use std::io::{Error, ErrorKind, Write};

/// A writer which accepts a fixed number of bytes before failing.
///
/// Useful for tests of how a writer behaves when its sink fails part way through an entry.
pub(crate) struct FailingSink {
    pub(crate) remaining: usize,
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Error> {
        match self.remaining {
            0 => Err(Error::new(ErrorKind::Other, "sink is full")),
            remaining => {
                let written = remaining.min(buf.len());
                self.remaining -= written;
                Ok(written)
            }
        }
    }

    fn flush(&mut self) -> Result<(), Error> {
        Ok(())
    }
}

#[test]
fn failing_sink_is_io_failure() {
    use crate::base::write::ZipFileWriter;
    use crate::{Compression, ZipEntryBuilder};

    let mut writer = ZipFileWriter::new(FailingSink { remaining: 16 });
    let opts = ZipEntryBuilder::new("foo.bar".to_string(), Compression::Stored);

    let err = writer.write_entry_whole(opts, b"some data").expect_err("wrote past a full sink");
    assert_eq!(err.kind(), crate::error::ErrorKind::IoFailure);
}

#[test]
fn unencodable_name_leaves_writer_untouched() {
    use crate::base::write::ZipFileWriter;
    use crate::{Compression, NameEncoding, ZipEntryBuilder};

    let latin = NameEncoding::for_label("windows-1252").expect("windows-1252 label");
    let mut writer = ZipFileWriter::new(Vec::new()).with_encoding(latin);
    let opts = ZipEntryBuilder::new("\u{4E2D}.txt".to_string(), Compression::Stored);

    let err = writer.write_entry_whole(opts, b"data").expect_err("wrote an unencodable name");
    assert!(matches!(err, crate::error::ZipError::NameNotEncodable(_, _)));
    assert_eq!(writer.offset(), 0);
    assert!(writer.is_empty());
}
