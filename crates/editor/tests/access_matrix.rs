//! Integration tests for the access matrix session.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;

use pageforge_core::access::{AccessChange, UserFilter};
use pageforge_core::audit::action_types;
use pageforge_core::error::CoreError;
use pageforge_core::roles::{Role, RoleFilter};
use pageforge_directory::DirectoryError;
use pageforge_editor::{AccessMatrix, EditorError, MatrixEvent};

use common::{sample_pages, sample_users, RecordingDirectory};

async fn loaded_matrix() -> (AccessMatrix, Arc<RecordingDirectory>) {
    let directory = Arc::new(RecordingDirectory::new(sample_users(), sample_pages()));
    let mut matrix = AccessMatrix::new(directory.clone());
    matrix.load().await.unwrap();
    (matrix, directory)
}

// ---------------------------------------------------------------------------
// Grid computation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn privileged_roles_have_access_to_every_page() {
    let (matrix, _) = loaded_matrix().await;
    for user_id in ["u-admin", "u-dev"] {
        for page_id in ["p1", "p2", "p3"] {
            assert!(matrix.has_access(user_id, page_id).unwrap());
        }
    }
}

#[tokio::test]
async fn plain_user_access_follows_assignments() {
    let (matrix, _) = loaded_matrix().await;
    assert!(matrix.has_access("u-ann", "p1").unwrap());
    assert!(!matrix.has_access("u-ann", "p2").unwrap());
    assert!(!matrix.has_access("u-joanne", "p1").unwrap());
}

#[tokio::test]
async fn has_access_for_unknown_user_is_reported() {
    let (matrix, _) = loaded_matrix().await;
    let err = matrix.has_access("ghost", "p1").unwrap_err();
    assert_matches!(err, EditorError::Core(CoreError::NotFound { entity: "User", .. }));
}

// ---------------------------------------------------------------------------
// Filtered listings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_filters_case_insensitively_preserving_order() {
    let (matrix, _) = loaded_matrix().await;
    let filter = UserFilter {
        search_text: "ann".to_string(),
        role: RoleFilter::All,
    };
    let ids: Vec<&str> = matrix.users(&filter).iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u-ann", "u-joanne"]);
}

#[tokio::test]
async fn role_filter_narrows_listing() {
    let (matrix, _) = loaded_matrix().await;
    let filter = UserFilter {
        search_text: String::new(),
        role: RoleFilter::Only(Role::Developer),
    };
    let ids: Vec<&str> = matrix.users(&filter).iter().map(|u| u.id.as_str()).collect();
    assert_eq!(ids, vec!["u-dev"]);
}

// ---------------------------------------------------------------------------
// Toggling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn toggle_appends_to_the_assignment_set() {
    let (mut matrix, directory) = loaded_matrix().await;

    let change = matrix.toggle_access("u-admin", "u-ann", "p2").await.unwrap();
    assert_eq!(change, AccessChange::Granted);
    assert!(matrix.has_access("u-ann", "p2").unwrap());

    // The directory received the full replacement set, in append order.
    let calls = directory.assignment_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "u-ann");
    assert_eq!(calls[0].1, vec!["p1".to_string(), "p2".to_string()]);
}

#[tokio::test]
async fn toggle_twice_restores_the_original_set() {
    let (mut matrix, directory) = loaded_matrix().await;

    matrix.toggle_access("u-admin", "u-ann", "p2").await.unwrap();
    let change = matrix.toggle_access("u-admin", "u-ann", "p2").await.unwrap();

    assert_eq!(change, AccessChange::Revoked);
    assert!(!matrix.has_access("u-ann", "p2").unwrap());
    let calls = directory.assignment_calls();
    assert_eq!(calls[1].1, vec!["p1".to_string()]);
}

#[tokio::test]
async fn toggle_for_privileged_role_is_rejected_without_a_directory_call() {
    let (mut matrix, directory) = loaded_matrix().await;

    let err = matrix
        .toggle_access("u-admin", "u-dev", "p1")
        .await
        .unwrap_err();
    assert_matches!(
        err,
        EditorError::RoleNotToggleable { role: Role::Developer, .. }
    );
    assert!(directory.assignment_calls().is_empty());
}

#[tokio::test]
async fn toggle_for_stale_user_is_a_reported_no_op() {
    let (mut matrix, directory) = loaded_matrix().await;

    let err = matrix
        .toggle_access("u-admin", "ghost", "p1")
        .await
        .unwrap_err();
    assert_matches!(err, EditorError::Core(CoreError::NotFound { entity: "User", .. }));
    assert!(directory.assignment_calls().is_empty());
}

#[tokio::test]
async fn toggle_for_stale_page_is_a_reported_no_op() {
    let (mut matrix, directory) = loaded_matrix().await;

    let err = matrix
        .toggle_access("u-admin", "u-ann", "gone")
        .await
        .unwrap_err();
    assert_matches!(err, EditorError::Core(CoreError::NotFound { entity: "Page", .. }));
    assert!(directory.assignment_calls().is_empty());
}

#[tokio::test]
async fn failed_directory_call_leaves_local_state_untouched() {
    let (mut matrix, directory) = loaded_matrix().await;
    directory.fail_next_assignments(1);

    let err = matrix
        .toggle_access("u-admin", "u-ann", "p2")
        .await
        .unwrap_err();
    assert_matches!(err, EditorError::Directory(DirectoryError::Unavailable(_)));

    // Local state never ran ahead of what was persisted.
    assert!(!matrix.has_access("u-ann", "p2").unwrap());

    // A retry after the outage succeeds normally.
    let change = matrix.toggle_access("u-admin", "u-ann", "p2").await.unwrap();
    assert_eq!(change, AccessChange::Granted);
    assert!(matrix.has_access("u-ann", "p2").unwrap());
}

#[tokio::test]
async fn toggle_emits_audit_record_and_change_event() {
    let (mut matrix, directory) = loaded_matrix().await;
    let mut events = matrix.subscribe();

    matrix.toggle_access("u-admin", "u-ann", "p2").await.unwrap();

    let MatrixEvent::AccessChanged {
        user_id,
        page_id,
        change,
    } = events.try_recv().unwrap();
    assert_eq!(user_id, "u-ann");
    assert_eq!(page_id, "p2");
    assert_eq!(change, AccessChange::Granted);

    let actions = directory.audit_actions();
    assert_eq!(actions, vec![action_types::ACCESS_GRANT.to_string()]);
}
