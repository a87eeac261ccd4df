// Copyright (c) 2021 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! A module which holds relevant error reporting structures/types.

use thiserror::Error;

/// A Result type alias over ZipError to minimise repetition.
pub type Result<V> = std::result::Result<V, ZipError>;

/// The broad category an error falls into.
///
/// Callers which only care about *what kind* of failure occurred (eg. to distinguish a wrong password from a
/// corrupt archive) should match on this rather than on individual [`ZipError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An operation was called outside of its valid session state.
    InvalidState,
    /// The archive bytes are malformed, truncated, or otherwise unusable.
    CorruptData,
    /// Decompressed bytes disagree with the stored CRC32 value.
    ChecksumMismatch,
    /// The supplied password failed the encryption header check.
    InvalidPassword,
    /// The underlying byte source or sink returned an error.
    IoFailure,
    /// An operation was attempted after the session was closed or finalised.
    SessionClosed,
}

/// An enum of possible errors and their descriptions.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ZipError {
    #[error("operation is not valid while the session is {0}")]
    InvalidState(&'static str),
    #[error("the session has already been closed")]
    SessionClosed,
    #[error("entry index was out of bounds")]
    EntryIndexOutOfBounds,

    #[error("feature not supported: '{0}'")]
    FeatureNotSupported(&'static str),
    #[error("compression not supported: {0}")]
    CompressionNotSupported(u16),
    #[error("archive requires ZIP64 extensions which are not supported")]
    Zip64Needed,

    #[error("unable to locate the end of central directory record")]
    UnableToLocateEOCDR,
    #[error("encountered an unexpected header (actual: {0:#x}, expected: {1:#x})")]
    UnexpectedHeaderError(u32, u32),
    #[error("the central directory lies outside of the archive bounds")]
    DirectoryOutOfBounds,
    #[error("central directory declares {expected} entries but {actual} were parsed")]
    EntryCountMismatch { expected: u64, actual: u64 },
    #[error("entry '{0}' extends past the start of the central directory")]
    EntryOutOfBounds(String),
    #[error("the compressed stream is corrupt: {0}")]
    CorruptStream(String),
    #[error("decompressed {actual} bytes whilst the entry declares {expected}")]
    SizeMismatch { expected: u64, actual: u64 },
    #[error("the data descriptor for '{0}' disagrees with its central directory record")]
    DescriptorMismatch(String),
    #[error("entry name '{0}' would escape the destination directory")]
    UnsafeEntryName(String),

    #[error("the name '{0}' cannot be represented in the {1} encoding")]
    NameNotEncodable(String, &'static str),
    #[error("file name too large")]
    FileNameTooLarge,
    #[error("comment too large")]
    CommentTooLarge,

    #[error("computed CRC32 did not match the expected value (expected: {expected:#010x}, actual: {actual:#010x})")]
    CRC32CheckError { expected: u32, actual: u32 },

    #[error("incorrect password for entry '{0}'")]
    InvalidPassword(String),
    #[error("entry '{0}' is encrypted but no password was supplied")]
    PasswordRequired(String),

    #[error("an upstream reader returned an error: {0}")]
    UpstreamReadError(#[from] std::io::Error),
}

impl ZipError {
    /// Returns the broad category this error falls into.
    ///
    /// A premature end of input from the upstream reader is reported as [`ErrorKind::CorruptData`] as it can only
    /// occur when a record or payload was truncated.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZipError::InvalidState(_) | ZipError::EntryIndexOutOfBounds => ErrorKind::InvalidState,
            ZipError::SessionClosed => ErrorKind::SessionClosed,
            ZipError::FeatureNotSupported(_)
            | ZipError::CompressionNotSupported(_)
            | ZipError::Zip64Needed
            | ZipError::UnableToLocateEOCDR
            | ZipError::UnexpectedHeaderError(_, _)
            | ZipError::DirectoryOutOfBounds
            | ZipError::EntryCountMismatch { .. }
            | ZipError::EntryOutOfBounds(_)
            | ZipError::CorruptStream(_)
            | ZipError::SizeMismatch { .. }
            | ZipError::DescriptorMismatch(_)
            | ZipError::UnsafeEntryName(_)
            | ZipError::NameNotEncodable(_, _)
            | ZipError::FileNameTooLarge
            | ZipError::CommentTooLarge => ErrorKind::CorruptData,
            ZipError::CRC32CheckError { .. } => ErrorKind::ChecksumMismatch,
            ZipError::InvalidPassword(_) | ZipError::PasswordRequired(_) => ErrorKind::InvalidPassword,
            ZipError::UpstreamReadError(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
                ErrorKind::CorruptData
            }
            ZipError::UpstreamReadError(_) => ErrorKind::IoFailure,
        }
    }
}
