// Copyright (c) 2024 Harry [Majored] [hello@majored.pw]
// MIT License (https://github.com/Majored/rs-async-zip/blob/main/LICENSE)

//! Caller-supplied decisions and notifications consulted during extraction.
//!
//! Both capabilities are optional plain closures. When absent, existing files are overwritten and progress goes
//! unreported.

use std::fmt;
use std::path::Path;

/// A snapshot of extraction progress, delivered after each entry is written or skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Whole-number completion percentage in the range 0 - 100.
    pub percentage: u32,
    /// The number of entries processed so far.
    pub processed: usize,
    /// The total number of entries being extracted.
    pub total: usize,
}

impl Progress {
    pub(crate) fn new(processed: usize, total: usize) -> Self {
        let percentage = match total {
            0 => 100,
            total => (processed * 100 / total) as u32,
        };

        Self { percentage, processed, total }
    }
}

type OverwriteFn<'a> = Box<dyn FnMut(&Path) -> bool + 'a>;
type ProgressFn<'a> = Box<dyn FnMut(Progress) + 'a>;

/// The overwrite and progress capabilities passed into an extraction call.
///
/// ```
/// # use ziparchive::ExtractPolicy;
/// let mut seen = Vec::new();
/// let policy = ExtractPolicy::new()
///     .on_overwrite(|_existing| false)
///     .on_progress(|progress| seen.push(progress.processed));
/// ```
#[derive(Default)]
pub struct ExtractPolicy<'a> {
    overwrite: Option<OverwriteFn<'a>>,
    progress: Option<ProgressFn<'a>>,
}

impl<'a> ExtractPolicy<'a> {
    /// Constructs a policy which always overwrites and reports nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decision made when a destination file already exists. Returning `false` skips the entry.
    pub fn on_overwrite(mut self, decide: impl FnMut(&Path) -> bool + 'a) -> Self {
        self.overwrite = Some(Box::new(decide));
        self
    }

    /// Sets the callback invoked after each entry is written or skipped due to a collision.
    pub fn on_progress(mut self, notify: impl FnMut(Progress) + 'a) -> Self {
        self.progress = Some(Box::new(notify));
        self
    }

    pub(crate) fn should_overwrite(&mut self, existing: &Path) -> bool {
        match self.overwrite.as_mut() {
            Some(decide) => decide(existing),
            None => true,
        }
    }

    pub(crate) fn report(&mut self, progress: Progress) {
        if let Some(notify) = self.progress.as_mut() {
            notify(progress);
        }
    }
}

impl fmt::Debug for ExtractPolicy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractPolicy")
            .field("overwrite", &self.overwrite.is_some())
            .field("progress", &self.progress.is_some())
            .finish()
    }
}
