// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::base::write::{to_u32, EncodedText, ZipFileWriter};
use crate::core::lfh::{self, LocalFileHeader, RawLocalFileHeader};
use crate::entry::ZipEntry;
use crate::error::Result;
use crate::spec::header::GeneralPurposeFlag;

use std::io::Write;

pub struct EntryWholeWriter<'b, 'c, W: Write> {
    writer: &'b mut ZipFileWriter<W>,
    entry: ZipEntry,
    data: &'c [u8],
}

impl<'b, 'c, W: Write> EntryWholeWriter<'b, 'c, W> {
    pub fn from_raw(writer: &'b mut ZipFileWriter<W>, entry: ZipEntry, data: &'c [u8]) -> Self {
        Self { writer, entry, data }
    }

    /// Writes the entry in full.
    ///
    /// Everything which can fail without I/O (name encoding, compression, size limits) is done before the first byte
    /// is written, so a failure there leaves the archive untouched.
    pub fn write(mut self) -> Result<()> {
        self.entry.compression = self.entry.compression_level.effective(self.entry.compression);
        self.entry.encrypted = self.writer.password.is_some();
        self.entry.data_descriptor = false;

        let text = EncodedText::from_entry(&self.entry, self.writer.encoding)?;
        let crc = crate::codec::crc32(self.data);
        let mut payload = crate::codec::compress(self.data, self.entry.compression, self.entry.compression_level)?;

        if let Some(password) = &self.writer.password {
            let check = crate::crypto::check_byte(crc, self.entry.last_modification_date.time, false);
            let (mut cipher, header) = crate::crypto::make_header(password, check);

            cipher.encrypt_in_place(&mut payload);
            payload = [header.as_slice(), &payload].concat();
        }

        self.entry.crc32 = crc;
        self.entry.uncompressed_size = self.data.len() as u64;
        self.entry.compressed_size = payload.len() as u64;

        let lfh_offset = self.writer.writer.offset();
        let flags = GeneralPurposeFlag {
            encrypted: self.entry.encrypted,
            data_descriptor: false,
            filename_unicode: text.unicode,
            compression_option: text.compression_option,
        };

        let header = LocalFileHeader {
            raw: RawLocalFileHeader {
                version_needed_to_extract: crate::spec::version::as_needed_to_extract(&self.entry),
                general_purpose_flags: flags.into(),
                compression_method: self.entry.compression.into(),
                last_mod_file_time: self.entry.last_modification_date.time,
                last_mod_file_date: self.entry.last_modification_date.date,
                crc_32: crc,
                compressed_size: to_u32(self.entry.compressed_size)?,
                uncompressed_size: to_u32(self.entry.uncompressed_size)?,
                file_name_length: text.filename_length()?,
                extra_field_length: 0,
            },
            file_name: text.filename.clone(),
            extra_field: Vec::new(),
        };

        let record = text.into_record(&header, &self.entry, lfh_offset)?;

        lfh::write(&mut self.writer.writer, &header)?;
        self.writer.writer.write_all(&payload)?;

        tracing::debug!(
            filename = self.entry.filename(),
            compressed_size = self.entry.compressed_size,
            uncompressed_size = self.entry.uncompressed_size,
            "wrote whole entry"
        );

        self.writer.cd_entries.push(record);
        Ok(())
    }
}
