//! Audit action vocabulary and record type.
//!
//! Audit records are appended through the directory collaborator and are
//! fire-and-forget from the caller's perspective: a failed append must
//! never block or fail the triggering user action.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::types::{Timestamp, UserId};

// ---------------------------------------------------------------------------
// Action type constants
// ---------------------------------------------------------------------------

/// Known action types for audit records.
pub mod action_types {
    pub const COMPONENT_ADD: &str = "component_add";
    pub const COMPONENT_DELETE: &str = "component_delete";
    pub const PREVIEW_ENTER: &str = "preview_enter";
    pub const PREVIEW_EXIT: &str = "preview_exit";
    pub const ACCESS_GRANT: &str = "access_grant";
    pub const ACCESS_REVOKE: &str = "access_revoke";
    pub const LAYOUT_SAVE: &str = "layout_save";
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One audit trail entry: who did what, with a human-readable detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub actor: UserId,
    pub action: String,
    pub detail: String,
    /// When the record was created (UTC).
    pub timestamp: Timestamp,
}

impl AuditRecord {
    /// Create a record stamped with the current time.
    pub fn new(
        actor: impl Into<UserId>,
        action: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            actor: actor.into(),
            action: action.into(),
            detail: detail.into(),
            timestamp: Utc::now(),
        }
    }
}
