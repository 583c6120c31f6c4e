use pageforge_core::error::CoreError;
use pageforge_core::roles::Role;
use pageforge_directory::DirectoryError;

/// Session-level error type for the editor units.
///
/// Wraps [`CoreError`] for domain failures and [`DirectoryError`] for
/// collaborator failures, and adds session-specific variants.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// A domain-level error from `pageforge-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A failure reported by the directory collaborator.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The operation is not available while preview mode is active.
    #[error("Not available in preview mode: {0}")]
    PreviewMode(String),

    /// Privileged access is implicit and cannot be toggled per page.
    #[error("Access for role '{role}' is not individually revocable (user {user_id})")]
    RoleNotToggleable { user_id: String, role: Role },
}

/// Convenience type alias for session operation results.
pub type EditorResult<T> = Result<T, EditorError>;
