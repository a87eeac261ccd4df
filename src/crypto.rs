// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Traditional PKWARE encryption (ZipCrypto).
//!
//! <https://github.com/Majored/rs-async-zip/blob/main/SPECIFICATION.md#6131>
//!
//! This cipher is cryptographically weak and is supported only for compatibility with archives produced by legacy
//! tools. A fresh [`ZipCrypto`] state is seeded from the password for every entry, and each entry carries its own
//! random 12-byte encryption header, so no keystream is ever shared between entries.

use crate::spec::consts::ENCRYPTION_HEADER_LENGTH;

use std::io::Write;

use rand::RngCore;

/// The reflected CRC-32 table used for key updates.
///
/// Key updates apply the raw CRC step without the usual pre/post inversion, so `crc32fast` can't be used here.
const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            crc = if crc & 1 != 0 { (crc >> 1) ^ 0xEDB88320 } else { crc >> 1 };
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

#[inline]
fn crc32_update(crc: u32, byte: u8) -> u32 {
    CRC32_TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8)
}

/// The three-register keystream state of the traditional ZIP cipher.
#[derive(Clone)]
pub struct ZipCrypto {
    key0: u32,
    key1: u32,
    key2: u32,
}

impl ZipCrypto {
    /// Seeds a new keystream from the given password.
    pub fn new(password: &[u8]) -> Self {
        let mut cipher = Self { key0: 0x12345678, key1: 0x23456789, key2: 0x34567890 };

        for &byte in password {
            cipher.update_keys(byte);
        }

        cipher
    }

    #[inline]
    fn update_keys(&mut self, byte: u8) {
        self.key0 = crc32_update(self.key0, byte);
        self.key1 = self.key1.wrapping_add(self.key0 & 0xFF).wrapping_mul(134775813).wrapping_add(1);
        self.key2 = crc32_update(self.key2, (self.key1 >> 24) as u8);
    }

    #[inline]
    fn stream_byte(&self) -> u8 {
        let temp = (self.key2 | 2) as u16;
        (temp.wrapping_mul(temp ^ 1) >> 8) as u8
    }

    /// Encrypts a single plaintext byte, advancing the keystream.
    #[inline]
    pub fn encrypt_byte(&mut self, byte: u8) -> u8 {
        let encrypted = byte ^ self.stream_byte();
        self.update_keys(byte);
        encrypted
    }

    /// Decrypts a single ciphertext byte, advancing the keystream.
    #[inline]
    pub fn decrypt_byte(&mut self, byte: u8) -> u8 {
        let decrypted = byte ^ self.stream_byte();
        self.update_keys(decrypted);
        decrypted
    }

    pub fn encrypt_in_place(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = self.encrypt_byte(*byte);
        }
    }

    pub fn decrypt_in_place(&mut self, buffer: &mut [u8]) {
        for byte in buffer.iter_mut() {
            *byte = self.decrypt_byte(*byte);
        }
    }

    /// Encrypts an encryption header built from 11 random bytes followed by the verification byte.
    pub fn encrypt_header(&mut self, random: [u8; 11], check: u8) -> [u8; ENCRYPTION_HEADER_LENGTH] {
        let mut header = [0; ENCRYPTION_HEADER_LENGTH];
        header[..11].copy_from_slice(&random);
        header[11] = check;

        self.encrypt_in_place(&mut header);
        header
    }

    /// Decrypts an entry's encryption header and returns whether its verification byte matches.
    ///
    /// The keystream is left positioned at the first payload byte either way.
    pub fn verify_header(&mut self, mut header: [u8; ENCRYPTION_HEADER_LENGTH], check: u8) -> bool {
        self.decrypt_in_place(&mut header);
        header[11] == check
    }
}

/// Seeds a new keystream from the password and produces a random encrypted header carrying the given verification
/// byte.
///
/// The returned cipher continues from the end of the header and must be used for the entry's payload.
pub fn make_header(password: &[u8], check: u8) -> (ZipCrypto, [u8; ENCRYPTION_HEADER_LENGTH]) {
    let mut random = [0; 11];
    rand::rng().fill_bytes(&mut random);

    let mut cipher = ZipCrypto::new(password);
    let header = cipher.encrypt_header(random, check);

    (cipher, header)
}

/// Returns the verification byte for an entry.
///
/// Entries whose CRC is known upfront use its high byte. Entries which defer their CRC to a data descriptor use the
/// high byte of their DOS modification time instead, as the CRC isn't known when the header is written.
pub fn check_byte(crc: u32, mod_time: u16, data_descriptor: bool) -> u8 {
    match data_descriptor {
        true => (mod_time >> 8) as u8,
        false => (crc >> 24) as u8,
    }
}

/// A writer which optionally encrypts every byte passing through it.
pub(crate) struct EncryptingWriter<W> {
    inner: W,
    cipher: Option<ZipCrypto>,
    buffer: Vec<u8>,
}

impl<W: Write> EncryptingWriter<W> {
    pub(crate) fn new(inner: W, cipher: Option<ZipCrypto>) -> Self {
        Self { inner, cipher, buffer: Vec::new() }
    }

    pub(crate) fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for EncryptingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let cipher = match self.cipher.as_mut() {
            Some(cipher) => cipher,
            None => return self.inner.write(buf),
        };

        // The keystream advances per byte, so the whole buffer is encrypted and written in full to keep the two in
        // step.
        self.buffer.clear();
        self.buffer.extend_from_slice(buf);
        cipher.encrypt_in_place(&mut self.buffer);
        self.inner.write_all(&self.buffer)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
