// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Path-based archive sessions with explicit, runtime-checked state machines.
//!
//! Where [`crate::base`] ties an archive's lifetime to the types in use, sessions own their storage between calls
//! and reject operations made in the wrong state:
//! - before open, with [`ErrorKind::InvalidState`](crate::error::ErrorKind::InvalidState)
//! - after finalize, abort, or close, with [`ErrorKind::SessionClosed`](crate::error::ErrorKind::SessionClosed)

pub mod read;
pub mod write;

pub use read::{ExtractFailure, ExtractOutcome, ExtractReport, MemoryReport, ReadSession};
pub use write::WriteSession;

/// The lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unopened,
    Open,
    /// A write session whose central directory has been written.
    Finalized,
    /// A write session whose storage was released without a central directory.
    Aborted,
    /// A read session whose source has been released.
    Closed,
}
