//! Auto-save status tracking for a canvas editing session.
//!
//! The save lifecycle is an explicit state machine rather than a bare
//! status flag, so the race between an in-flight persist call and newer
//! local mutations is detectable and testable:
//!
//! ```text
//! saved --mutation--> unsaved --debounce elapsed--> saving
//! saving --completed, no newer mutation--> saved
//! saving --completed, newer mutation exists--> unsaved   (superseded)
//! saving --failed--> unsaved
//! ```
//!
//! Mutations are counted with a monotonically increasing epoch. A save
//! captures the epoch when it starts; on completion the captured epoch is
//! compared against the current one to decide whether the persisted
//! snapshot still matches local state.

use serde::{Deserialize, Serialize};

/// Whether the in-memory component list matches the last persisted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveStatus {
    Saved,
    Unsaved,
    Saving,
}

/// Result of completing a save attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The persisted snapshot matches current local state.
    Confirmed,
    /// The persist call succeeded but local state moved on meanwhile;
    /// the session is dirty again.
    Superseded,
    /// The persist call failed; the session stays dirty.
    Failed,
}

/// Tracks the save status and mutation epoch of one editing session.
#[derive(Debug, Clone)]
pub struct SaveTracker {
    status: SaveStatus,
    epoch: u64,
}

impl SaveTracker {
    /// A fresh session starts in sync with its (possibly empty) snapshot.
    pub fn new() -> Self {
        Self {
            status: SaveStatus::Saved,
            epoch: 0,
        }
    }

    pub fn status(&self) -> SaveStatus {
        self.status
    }

    /// Current mutation epoch. Starts at 0; bumped by every mutation.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True when local state has diverged from the persisted snapshot.
    pub fn is_dirty(&self) -> bool {
        self.status != SaveStatus::Saved
    }

    /// Record a local mutation. Returns the new epoch.
    ///
    /// Also invalidates any save currently in flight: when it completes
    /// it will observe a newer epoch and report [`SaveOutcome::Superseded`].
    pub fn on_mutation(&mut self) -> u64 {
        self.epoch += 1;
        self.status = SaveStatus::Unsaved;
        self.epoch
    }

    /// Mark a save attempt as started. Returns the epoch the snapshot
    /// being persisted was taken at; pass it back to [`complete_save`].
    ///
    /// [`complete_save`]: SaveTracker::complete_save
    pub fn begin_save(&mut self) -> u64 {
        self.status = SaveStatus::Saving;
        self.epoch
    }

    /// Complete a save attempt started at `snapshot_epoch`.
    pub fn complete_save(&mut self, snapshot_epoch: u64, success: bool) -> SaveOutcome {
        if !success {
            self.status = SaveStatus::Unsaved;
            return SaveOutcome::Failed;
        }
        if snapshot_epoch < self.epoch {
            self.status = SaveStatus::Unsaved;
            SaveOutcome::Superseded
        } else {
            self.status = SaveStatus::Saved;
            SaveOutcome::Confirmed
        }
    }
}

impl Default for SaveTracker {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
