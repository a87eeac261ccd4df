// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::write::compressed_writer::CompressedWriter;
use crate::base::write::io::offset::OffsetWriter;
use crate::base::write::{to_u32, EncodedText, ZipFileWriter};
use crate::core::cdr::CentralDirectoryRecord;
use crate::core::dd::{self, DataDescriptor, RawDataDescriptor};
use crate::core::lfh::{self, LocalFileHeader, RawLocalFileHeader};
use crate::entry::ZipEntry;
use crate::error::Result;
use crate::spec::header::GeneralPurposeFlag;

use std::io::Write;

use crc32fast::Hasher;

/// An entry writer which supports the streaming of data (ie. the writing of unknown size or data at runtime).
///
/// The local file header is written with a zeroed CRC and sizes, and the data descriptor flag set. The true values are
/// written in a data descriptor following the entry's data, and in the central directory.
///
/// # Note
/// - This writer cannot be manually constructed; instead, use [`ZipFileWriter::write_entry_stream()`].
/// - [`EntryStreamWriter::close()`] must be called before a stream writer goes out of scope.
pub struct EntryStreamWriter<'b, W: Write> {
    writer: OffsetWriter<CompressedWriter<'b, W>>,
    cd_entries: &'b mut Vec<CentralDirectoryRecord>,
    entry: ZipEntry,
    text: EncodedText,
    hasher: Hasher,
    lfh: LocalFileHeader,
    lfh_offset: u64,
    data_offset: u64,
}

impl<'b, W: Write> EntryStreamWriter<'b, W> {
    pub(crate) fn from_raw(writer: &'b mut ZipFileWriter<W>, mut entry: ZipEntry) -> Result<EntryStreamWriter<'b, W>> {
        entry.compression = entry.compression_level.effective(entry.compression);
        entry.encrypted = writer.password.is_some();
        entry.data_descriptor = true;

        let text = EncodedText::from_entry(&entry, writer.encoding)?;
        let lfh_offset = writer.writer.offset();
        to_u32(lfh_offset)?;

        let flags = GeneralPurposeFlag {
            encrypted: entry.encrypted,
            data_descriptor: true,
            filename_unicode: text.unicode,
            compression_option: text.compression_option,
        };

        let lfh = LocalFileHeader {
            raw: RawLocalFileHeader {
                version_needed_to_extract: crate::spec::version::as_needed_to_extract(&entry),
                general_purpose_flags: flags.into(),
                compression_method: entry.compression.into(),
                last_mod_file_time: entry.last_modification_date.time,
                last_mod_file_date: entry.last_modification_date.date,
                crc_32: 0,
                compressed_size: 0,
                uncompressed_size: 0,
                file_name_length: text.filename_length()?,
                extra_field_length: 0,
            },
            file_name: text.filename.clone(),
            extra_field: Vec::new(),
        };

        lfh::write(&mut writer.writer, &lfh)?;
        let data_offset = writer.writer.offset();

        // The CRC isn't known yet, so the header is verified against the modification time instead.
        let cipher = match &writer.password {
            Some(password) => {
                let check = crate::crypto::check_byte(0, entry.last_modification_date.time, true);
                let (cipher, header) = crate::crypto::make_header(password, check);

                writer.writer.write_all(&header)?;
                Some(cipher)
            }
            None => None,
        };

        let cd_entries = &mut writer.cd_entries;
        let writer = OffsetWriter::new(CompressedWriter::from_raw(
            &mut writer.writer,
            entry.compression,
            entry.compression_level,
            cipher,
        ));

        Ok(EntryStreamWriter { writer, cd_entries, entry, text, hasher: Hasher::new(), lfh, lfh_offset, data_offset })
    }

    /// Consumes this entry writer and completes all closing tasks.
    ///
    /// This includes:
    /// - Finalising the CRC32 hash value for the written data.
    /// - Calculating the compressed and uncompressed byte sizes.
    /// - Writing the data descriptor.
    /// - Constructing a central directory header.
    /// - Pushing that central directory header to the [`ZipFileWriter`]'s store.
    ///
    /// Failure to call this function before going out of scope would result in a corrupted ZIP file.
    pub fn close(mut self) -> Result<()> {
        let crc = self.hasher.finalize();
        let uncompressed_size = self.writer.offset();
        let inner_writer = self.writer.into_inner().finish()?;
        let compressed_size = inner_writer.offset() - self.data_offset;

        self.entry.crc32 = crc;
        self.entry.uncompressed_size = uncompressed_size;
        self.entry.compressed_size = compressed_size;

        let descriptor = DataDescriptor {
            raw: RawDataDescriptor {
                crc_32: crc,
                compressed_size: to_u32(compressed_size)?,
                uncompressed_size: to_u32(uncompressed_size)?,
            },
        };

        dd::write(inner_writer, &descriptor)?;

        let mut record = self.text.into_record(&self.lfh, &self.entry, self.lfh_offset)?;
        record.crc_32 = descriptor.crc_32;
        record.compressed_size = descriptor.compressed_size;
        record.uncompressed_size = descriptor.uncompressed_size;

        tracing::debug!(filename = self.entry.filename(), compressed_size, uncompressed_size, "closed stream entry");

        self.cd_entries.push(record);
        Ok(())
    }
}

impl<'b, W: Write> Write for EntryStreamWriter<'b, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let written = self.writer.write(buf)?;
        self.hasher.update(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}
