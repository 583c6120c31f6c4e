//! Session change notifications.
//!
//! Both session units broadcast typed events over
//! `tokio::sync::broadcast` so callers (UI bindings, tests) can react to
//! changes without polling. Sends are best-effort: a session with no
//! subscribers simply drops the event.

use pageforge_core::access::AccessChange;
use pageforge_core::types::{PageId, UserId};

/// Capacity of the per-session broadcast channels.
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Events emitted by an access matrix session.
#[derive(Debug, Clone)]
pub enum MatrixEvent {
    /// One (user, page) cell was toggled and confirmed by the directory.
    AccessChanged {
        user_id: UserId,
        page_id: PageId,
        change: AccessChange,
    },
}

/// Events emitted by a canvas editing session.
#[derive(Debug, Clone)]
pub enum CanvasEvent {
    /// The component list changed (add, update, or delete).
    Mutated,
    /// A persist attempt started.
    SaveStarted,
    /// The persisted snapshot matches current local state.
    Saved,
    /// The persist call succeeded but newer mutations exist; the session
    /// is dirty again.
    SaveSuperseded,
    /// The persist call failed; the session stays dirty.
    SaveFailed { reason: String },
}
