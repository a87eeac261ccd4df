// Copyright (c) 2023 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

use crate::error::{Result, ZipError};

use encoding_rs::Encoding;

/// The character encoding used to encode and decode entry names and comments.
///
/// ZIP files don't record which legacy code page a name was written with, so the encoding has to be declared by the
/// caller and must match between the writer and reader for names to round-trip. The only exception is the language
/// encoding flag (general purpose bit 11): names carrying it are always decoded as UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameEncoding(&'static Encoding);

impl NameEncoding {
    /// The UTF-8 encoding, used by default.
    pub const UTF_8: NameEncoding = NameEncoding(encoding_rs::UTF_8);

    /// Constructs a name encoding from an `encoding_rs` encoding.
    pub fn new(encoding: &'static Encoding) -> Self {
        Self(encoding)
    }

    /// Looks up an encoding by its WHATWG label (eg. `"shift_jis"`, `"gbk"`, `"windows-1252"`).
    pub fn for_label(label: &str) -> Option<Self> {
        Encoding::for_label(label.as_bytes()).map(Self)
    }

    /// Returns the canonical name of this encoding.
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Returns whether this is the UTF-8 encoding.
    pub fn is_utf8(&self) -> bool {
        self.0 == encoding_rs::UTF_8
    }

    /// Encodes a string into its raw bytes, returning whether the language encoding flag should be set.
    pub(crate) fn encode(&self, value: &str) -> Result<(Vec<u8>, bool)> {
        if self.is_utf8() {
            return Ok((value.as_bytes().to_vec(), !value.is_ascii()));
        }

        let (raw, _, had_errors) = self.0.encode(value);
        if had_errors {
            return Err(ZipError::NameNotEncodable(value.to_string(), self.name()));
        }

        Ok((raw.into_owned(), false))
    }

    /// Decodes raw bytes into a string.
    ///
    /// Malformed sequences are replaced rather than rejected so that listing a directory never fails on a name.
    pub(crate) fn decode(&self, raw: &[u8], utf8_flag: bool) -> String {
        if utf8_flag || self.is_utf8() {
            return String::from_utf8_lossy(raw).into_owned();
        }

        self.0.decode_without_bom_handling(raw).0.into_owned()
    }
}

impl Default for NameEncoding {
    fn default() -> Self {
        Self::UTF_8
    }
}
