// Copyright (c) 2022 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A ZIP reader which acts over a seekable source.
//!
//! ### Example
//! ```no_run
//! # use ziparchive::base::read::seek::ZipFileReader;
//! # use ziparchive::error::Result;
//! # use std::fs::File;
//! #
//! fn run() -> Result<()> {
//!     let data = File::open("./foo.zip")?;
//!     let mut reader = ZipFileReader::new(data)?;
//!
//!     let data = reader.read_entry(0)?;
//!
//!     // Use data within current scope.
//!
//!     Ok(())
//! }
//! ```

use crate::crypto::ZipCrypto;
use crate::entry::StoredZipEntry;
use crate::error::{Result, ZipError};
use crate::file::ZipFile;
use crate::spec::consts::ENCRYPTION_HEADER_LENGTH;
use crate::string::NameEncoding;

use std::io::{Read, Seek, SeekFrom};

/// A ZIP reader which acts over a seekable source.
#[derive(Clone)]
pub struct ZipFileReader<R> {
    reader: R,
    file: ZipFile,
}

impl<R> ZipFileReader<R>
where
    R: Read + Seek,
{
    /// Constructs a new ZIP reader from a seekable source, decoding names as UTF-8.
    pub fn new(reader: R) -> Result<ZipFileReader<R>> {
        Self::with_encoding(reader, NameEncoding::default())
    }

    /// Constructs a new ZIP reader from a seekable source, decoding names without the UTF-8 flag in the given
    /// encoding.
    pub fn with_encoding(mut reader: R, encoding: NameEncoding) -> Result<ZipFileReader<R>> {
        let file = crate::base::read::file(&mut reader, encoding)?;
        Ok(ZipFileReader::from_raw_parts(reader, file))
    }

    /// Constructs a ZIP reader from a seekable source and ZIP file information derived from that source.
    ///
    /// Providing a [`ZipFile`] that wasn't derived from that source may lead to inaccurate parsing.
    pub fn from_raw_parts(reader: R, file: ZipFile) -> ZipFileReader<R> {
        ZipFileReader { reader, file }
    }

    /// Returns this ZIP file's information.
    pub fn file(&self) -> &ZipFile {
        &self.file
    }

    /// Returns a mutable reference to the inner seekable source.
    ///
    /// Swapping the source (eg. via std::mem operations) may lead to inaccurate parsing.
    pub fn inner_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Returns the inner seekable source by consuming self.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Reads and returns the decompressed data of the entry at the given index.
    pub fn read_entry(&mut self, index: usize) -> Result<Vec<u8>> {
        self.read_entry_with_password(index, None)
    }

    /// Reads and returns the decompressed data of the entry at the given index, decrypting it if needed.
    ///
    /// This function does so by:
    /// - skipping the entry's local file header
    /// - reading the entry's compressed data
    /// - verifying the password against the encryption header, and decrypting the remaining data
    /// - decompressing the data and asserting its length
    /// - asserting the CRC32 of the decompressed data
    /// - asserting the data descriptor agrees with the central directory, if one is present
    ///
    /// The password is checked before any decompression is attempted. Should a wrong password pass the one-byte
    /// header check, the resulting decompression, length, or CRC failure is reported as an incorrect password too.
    #[tracing::instrument(skip(self, password))]
    pub fn read_entry_with_password(&mut self, index: usize, password: Option<&[u8]>) -> Result<Vec<u8>> {
        let stored = self.file.entries.get(index).ok_or(ZipError::EntryIndexOutOfBounds)?;

        self.reader.seek(SeekFrom::Start(stored.header_offset()))?;
        crate::core::lfh::read(&mut self.reader)?;

        let mut payload = crate::utils::read_bytes(&mut self.reader, stored.compressed_size() as usize)?;

        if stored.encrypted() {
            let password = password.ok_or_else(|| ZipError::PasswordRequired(stored.filename().to_string()))?;
            payload = decrypt(stored, password, payload)?;
        }

        let data = match decode(stored, &payload) {
            // The check byte lets a wrong password through 1 time in 256, after which only garbage can be decoded.
            Err(_) if stored.encrypted() => return Err(ZipError::InvalidPassword(stored.filename().to_string())),
            result => result?,
        };

        if stored.data_descriptor() {
            let descriptor = crate::core::dd::read(&mut self.reader)?;

            if descriptor.crc_32 != stored.crc32()
                || descriptor.compressed_size as u64 != stored.compressed_size()
                || descriptor.uncompressed_size as u64 != stored.uncompressed_size()
            {
                return Err(ZipError::DescriptorMismatch(stored.filename().to_string()));
            }
        }

        Ok(data)
    }
}

/// Decompresses an entry's plaintext payload and asserts its CRC32.
fn decode(stored: &StoredZipEntry, payload: &[u8]) -> Result<Vec<u8>> {
    let data = crate::codec::decompress(payload, stored.compression(), stored.uncompressed_size())?;
    let actual = crate::codec::crc32(&data);

    match actual == stored.crc32() {
        true => Ok(data),
        false => Err(ZipError::CRC32CheckError { expected: stored.crc32(), actual }),
    }
}

/// Verifies the password against the entry's encryption header and decrypts the remaining data.
fn decrypt(stored: &StoredZipEntry, password: &[u8], payload: Vec<u8>) -> Result<Vec<u8>> {
    if payload.len() < ENCRYPTION_HEADER_LENGTH {
        return Err(ZipError::CorruptStream(format!(
            "entry '{}' is shorter than its encryption header",
            stored.filename()
        )));
    }

    let mut header = [0; ENCRYPTION_HEADER_LENGTH];
    header.copy_from_slice(&payload[..ENCRYPTION_HEADER_LENGTH]);

    let mut cipher = ZipCrypto::new(password);
    let check =
        crate::crypto::check_byte(stored.crc32(), stored.last_modification_date().raw_time(), stored.data_descriptor());

    if !cipher.verify_header(header, check) {
        return Err(ZipError::InvalidPassword(stored.filename().to_string()));
    }

    let mut data = payload[ENCRYPTION_HEADER_LENGTH..].to_vec();
    cipher.decrypt_in_place(&mut data);
    Ok(data)
}
