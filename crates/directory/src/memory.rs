//! In-process reference implementation of the directory contract.
//!
//! Backs the editor sessions in tests and single-process deployments.
//! Layout persistence is a real snapshot store here: `persist_page_layout`
//! replaces the per-page component list, and [`InMemoryDirectory::saved_layout`]
//! reads it back.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use pageforge_core::access::{Page, User};
use pageforge_core::audit::AuditRecord;
use pageforge_core::canvas::CanvasComponent;
use pageforge_core::types::PageId;

use crate::error::DirectoryError;
use crate::provider::Directory;

#[derive(Default)]
struct State {
    users: Vec<User>,
    pages: Vec<Page>,
    layouts: HashMap<PageId, Vec<CanvasComponent>>,
    audit: Vec<AuditRecord>,
}

/// Lock-guarded in-memory directory.
pub struct InMemoryDirectory {
    state: RwLock<State>,
}

impl InMemoryDirectory {
    /// Create a directory seeded with the given users and pages.
    pub fn new(users: Vec<User>, pages: Vec<Page>) -> Self {
        Self {
            state: RwLock::new(State {
                users,
                pages,
                ..Default::default()
            }),
        }
    }

    /// The last persisted layout snapshot for a page, if any.
    pub async fn saved_layout(&self, page_id: &str) -> Option<Vec<CanvasComponent>> {
        self.state.read().await.layouts.get(page_id).cloned()
    }

    /// The full audit trail, in append order.
    pub async fn audit_trail(&self) -> Vec<AuditRecord> {
        self.state.read().await.audit.clone()
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.state.read().await.users.clone())
    }

    async fn list_pages(&self) -> Result<Vec<Page>, DirectoryError> {
        Ok(self.state.read().await.pages.clone())
    }

    async fn set_user_page_assignments(
        &self,
        user_id: &str,
        page_ids: Vec<PageId>,
    ) -> Result<(), DirectoryError> {
        let mut state = self.state.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DirectoryError::UnknownUser(user_id.to_string()))?;
        user.assigned_pages = page_ids;
        tracing::debug!(user_id, "Replaced page assignments");
        Ok(())
    }

    async fn persist_page_layout(
        &self,
        page_id: &str,
        components: &[CanvasComponent],
    ) -> Result<(), DirectoryError> {
        let mut state = self.state.write().await;
        if !state.pages.iter().any(|p| p.id == page_id) {
            return Err(DirectoryError::UnknownPage(page_id.to_string()));
        }
        state
            .layouts
            .insert(page_id.to_string(), components.to_vec());
        tracing::debug!(page_id, components = components.len(), "Persisted page layout");
        Ok(())
    }

    async fn record_audit_event(&self, record: AuditRecord) {
        self.state.write().await.audit.push(record);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
