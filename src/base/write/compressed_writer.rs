// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::write::io::offset::OffsetWriter;
use crate::crypto::{EncryptingWriter, ZipCrypto};
use crate::spec::compression::{Compression, CompressionLevel};

use std::io::{Result, Write};

use flate2::write::DeflateEncoder;

/// The compress-then-encrypt pipeline an entry's payload is streamed through.
pub enum CompressedWriter<'b, W: Write> {
    Stored(EncryptingWriter<&'b mut OffsetWriter<W>>),
    Deflate(DeflateEncoder<EncryptingWriter<&'b mut OffsetWriter<W>>>),
}

impl<'b, W: Write> CompressedWriter<'b, W> {
    pub fn from_raw(
        writer: &'b mut OffsetWriter<W>,
        compression: Compression,
        level: CompressionLevel,
        cipher: Option<ZipCrypto>,
    ) -> Self {
        let writer = EncryptingWriter::new(writer, cipher);

        match compression {
            Compression::Stored => CompressedWriter::Stored(writer),
            Compression::Deflate => CompressedWriter::Deflate(DeflateEncoder::new(writer, level.into_flate2())),
        }
    }

    /// Flushes any buffered compressed data and returns the underlying writer.
    pub fn finish(self) -> Result<&'b mut OffsetWriter<W>> {
        match self {
            CompressedWriter::Stored(inner) => Ok(inner.into_inner()),
            CompressedWriter::Deflate(inner) => Ok(inner.finish()?.into_inner()),
        }
    }
}

impl<'b, W: Write> Write for CompressedWriter<'b, W> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        match self {
            CompressedWriter::Stored(inner) => inner.write(buf),
            CompressedWriter::Deflate(inner) => inner.write(buf),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            CompressedWriter::Stored(inner) => inner.flush(),
            CompressedWriter::Deflate(inner) => inner.flush(),
        }
    }
}
