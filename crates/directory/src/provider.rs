//! The injected directory collaborator trait.

use async_trait::async_trait;
use pageforge_core::access::{Page, User};
use pageforge_core::audit::AuditRecord;
use pageforge_core::canvas::CanvasComponent;
use pageforge_core::types::PageId;

use crate::error::DirectoryError;

/// The external service that owns users, pages, and persistence.
///
/// Editor sessions consume this trait and nothing else; implementations
/// decide where the data actually lives.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Full snapshot of all users.
    async fn list_users(&self) -> Result<Vec<User>, DirectoryError>;

    /// Full snapshot of all pages.
    async fn list_pages(&self) -> Result<Vec<Page>, DirectoryError>;

    /// Replace a user's entire assigned-page set.
    ///
    /// This is a full-set replacement, not a delta operation.
    async fn set_user_page_assignments(
        &self,
        user_id: &str,
        page_ids: Vec<PageId>,
    ) -> Result<(), DirectoryError>;

    /// Persist the canvas component list for a page, replacing any
    /// previous snapshot for that page.
    async fn persist_page_layout(
        &self,
        page_id: &str,
        components: &[CanvasComponent],
    ) -> Result<(), DirectoryError>;

    /// Append an audit record.
    ///
    /// Infallible from the caller's perspective: implementations must
    /// swallow (and log) internal failures so the triggering user action
    /// is never blocked.
    async fn record_audit_event(&self, record: AuditRecord);
}
