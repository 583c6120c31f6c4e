//! The page-access matrix session.
//!
//! Holds local snapshots of the directory's users and pages and exposes
//! the derived access grid plus the toggle operation. Toggles are
//! two-phase: the replacement assignment set is sent to the directory
//! first, and local state is updated only after the directory confirms,
//! so a failed call never leaves the session ahead of what was actually
//! persisted.

use std::sync::Arc;

use tokio::sync::broadcast;

use pageforge_core::access::{self, AccessChange, Page, User, UserFilter};
use pageforge_core::audit::{action_types, AuditRecord};
use pageforge_core::error::CoreError;
use pageforge_directory::Directory;

use crate::error::{EditorError, EditorResult};
use crate::events::{MatrixEvent, EVENT_CHANNEL_CAPACITY};

/// One user's effective-access session over the directory.
pub struct AccessMatrix {
    directory: Arc<dyn Directory>,
    users: Vec<User>,
    pages: Vec<Page>,
    events: broadcast::Sender<MatrixEvent>,
}

impl AccessMatrix {
    /// Create an empty session. Call [`load`](AccessMatrix::load) to pull
    /// the directory snapshots before use.
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            directory,
            users: Vec::new(),
            pages: Vec::new(),
            events,
        }
    }

    /// Refresh the local user and page snapshots from the directory.
    pub async fn load(&mut self) -> EditorResult<()> {
        self.users = self.directory.list_users().await?;
        self.pages = self.directory.list_pages().await?;
        tracing::info!(
            users = self.users.len(),
            pages = self.pages.len(),
            "Directory snapshot loaded"
        );
        Ok(())
    }

    /// The ordered subset of users matching the filter.
    pub fn users(&self, filter: &UserFilter) -> Vec<&User> {
        access::filter_users(&self.users, filter)
    }

    /// All pages, in directory order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Effective access for one (user, page) cell.
    pub fn has_access(&self, user_id: &str, page_id: &str) -> EditorResult<bool> {
        let user = self.find_user(user_id)?;
        Ok(access::has_access(user, page_id))
    }

    /// Subscribe to access-change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<MatrixEvent> {
        self.events.subscribe()
    }

    /// Toggle one (user, page) cell.
    ///
    /// Grants when the user lacks access, revokes when they have it.
    /// Privileged roles are rejected with
    /// [`EditorError::RoleNotToggleable`] since their access is implicit.
    /// A target that is no longer in the local snapshots is a reported
    /// no-op (`NotFound`), not a panic.
    pub async fn toggle_access(
        &mut self,
        actor: &str,
        user_id: &str,
        page_id: &str,
    ) -> EditorResult<AccessChange> {
        let (next, change) = {
            let user = self.find_user(user_id)?;
            if user.role.is_privileged() {
                return Err(EditorError::RoleNotToggleable {
                    user_id: user_id.to_string(),
                    role: user.role,
                });
            }
            if !self.pages.iter().any(|p| p.id == page_id) {
                return Err(EditorError::Core(CoreError::NotFound {
                    entity: "Page",
                    id: page_id.to_string(),
                }));
            }
            access::toggled_assignments(user, page_id)
        };

        // Confirm with the directory before touching local state.
        self.directory
            .set_user_page_assignments(user_id, next.clone())
            .await?;

        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.assigned_pages = next;
        }

        let action = match change {
            AccessChange::Granted => action_types::ACCESS_GRANT,
            AccessChange::Revoked => action_types::ACCESS_REVOKE,
        };
        self.directory
            .record_audit_event(AuditRecord::new(
                actor,
                action,
                format!("page {page_id} for user {user_id}"),
            ))
            .await;

        let _ = self.events.send(MatrixEvent::AccessChanged {
            user_id: user_id.to_string(),
            page_id: page_id.to_string(),
            change,
        });

        tracing::info!(user_id, page_id, change = ?change, "Access toggled");
        Ok(change)
    }

    fn find_user(&self, user_id: &str) -> EditorResult<&User> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| {
                EditorError::Core(CoreError::NotFound {
                    entity: "User",
                    id: user_id.to_string(),
                })
            })
    }
}
