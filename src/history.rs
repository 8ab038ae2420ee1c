//! History log: cursor-based snapshot log backing undo and redo.
//!
//! DESIGN
//! ======
//! Every entry is a full, independent clone of the slide sequence. The cursor
//! points at the entry matching the live document. Pushing after an undo
//! drops everything past the cursor, so history is strictly linear and a
//! discarded redo branch can never be reached again.
//!
//! Capturing a snapshot validates the slides first. Non-finite numbers cannot
//! be written by the JSON persistence layer, so a sequence containing one is
//! refused with a warning and the log is left exactly as it was.
//!
//! An optional depth limit bounds memory on long sessions: once exceeded, the
//! oldest entry is dropped and the cursor shifts down with the rest.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use tracing::warn;

use crate::doc::Slide;
use crate::error::SnapshotError;

/// Snapshot log with a cursor.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    entries: Vec<Vec<Slide>>,
    cursor: Option<usize>,
    /// 0 means unlimited.
    max_depth: usize,
}

impl HistoryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that keeps at most `max_depth` entries (0 = unlimited).
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth, ..Self::default() }
    }

    /// Validate and clone `slides` into an independent snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::NonFinite`] if any element carries a NaN or
    /// infinite number in its geometry or style.
    pub fn capture(slides: &[Slide]) -> Result<Vec<Slide>, SnapshotError> {
        validate(slides)?;
        Ok(slides.to_vec())
    }

    /// Record `slides` as the newest entry, discarding any redo branch.
    ///
    /// Returns `false` and leaves the log unchanged if the snapshot could not
    /// be captured.
    pub fn push(&mut self, slides: &[Slide]) -> bool {
        let snapshot = match Self::capture(slides) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "history snapshot skipped");
                return false;
            }
        };

        match self.cursor {
            Some(cursor) => self.entries.truncate(cursor + 1),
            None => self.entries.clear(),
        }
        self.entries.push(snapshot);

        if self.max_depth > 0 && self.entries.len() > self.max_depth {
            let excess = self.entries.len() - self.max_depth;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len().checked_sub(1);
        true
    }

    /// Step back one entry and return it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&[Slide]> {
        let cursor = self.cursor.filter(|&c| c > 0)?;
        self.cursor = Some(cursor - 1);
        self.entries.get(cursor - 1).map(Vec::as_slice)
    }

    /// Step forward one entry and return it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&[Slide]> {
        let next = self.cursor? + 1;
        let entry = self.entries.get(next)?;
        self.cursor = Some(next);
        Some(entry.as_slice())
    }

    /// Seed the log with its first entry. No-op unless the log is empty.
    ///
    /// Returns `true` if the log was seeded.
    pub fn initialize(&mut self, slides: &[Slide]) -> bool {
        if !self.entries.is_empty() {
            return false;
        }
        self.push(slides)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry matching the live document, `None` when empty.
    #[must_use]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|c| c > 0)
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor.is_some_and(|c| c + 1 < self.entries.len())
    }

    /// The entry at the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&[Slide]> {
        self.entries.get(self.cursor?).map(Vec::as_slice)
    }
}

/// Check that every element number can be represented in JSON.
///
/// # Errors
///
/// Returns the first offending element and field.
pub fn validate(slides: &[Slide]) -> Result<(), SnapshotError> {
    for slide in slides {
        for element in &slide.elements {
            if let Some(field) = element.first_non_finite() {
                return Err(SnapshotError::NonFinite { slide: slide.id, element: element.id, field });
            }
        }
    }
    Ok(())
}
