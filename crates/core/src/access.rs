//! Effective page access computation and user listing filters.
//!
//! The access grid is derived, never stored: a (user, page) cell is true
//! when the user's role is privileged or the page id is in the user's
//! explicit assignment set. Only the per-user assignment set is ever
//! mutated, and only for `Role::User`; privileged access is not
//! individually revocable.

use serde::{Deserialize, Serialize};

use crate::canvas::ComponentKind;
use crate::roles::{Role, RoleFilter};
use crate::types::{PageId, UserId};

// ---------------------------------------------------------------------------
// Directory entities
// ---------------------------------------------------------------------------

/// A user as reported by the external directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub role: Role,
    /// Explicitly assigned page ids, in assignment order. Consulted only
    /// for `Role::User`; duplicates are never introduced by toggling.
    #[serde(default)]
    pub assigned_pages: Vec<PageId>,
}

/// A page as reported by the external directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub kind: ComponentKind,
    /// Embed URL for `powerbi` / `spreadsheet` pages.
    pub embed_url: Option<String>,
    /// Raw markup for `html` pages.
    pub html_content: Option<String>,
}

// ---------------------------------------------------------------------------
// Access grid
// ---------------------------------------------------------------------------

/// Effective access for one (user, page) cell.
///
/// Privileged roles always have access; `Role::User` access is a
/// membership test on the explicit assignment set.
pub fn has_access(user: &User, page_id: &str) -> bool {
    user.role.is_privileged() || user.assigned_pages.iter().any(|p| p == page_id)
}

/// Direction of an access toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessChange {
    Granted,
    Revoked,
}

/// Compute the replacement assignment set for toggling one page.
///
/// If the page is currently assigned it is removed; otherwise it is
/// appended at the end. The full set is returned because the directory
/// contract replaces the set wholesale rather than applying a delta.
/// Toggling twice restores the original set. Only meaningful for
/// `Role::User`; callers gate privileged roles before computing.
pub fn toggled_assignments(user: &User, page_id: &str) -> (Vec<PageId>, AccessChange) {
    if user.assigned_pages.iter().any(|p| p == page_id) {
        let next = user
            .assigned_pages
            .iter()
            .filter(|p| p.as_str() != page_id)
            .cloned()
            .collect();
        (next, AccessChange::Revoked)
    } else {
        let mut next = user.assigned_pages.clone();
        next.push(page_id.to_string());
        (next, AccessChange::Granted)
    }
}

// ---------------------------------------------------------------------------
// User listing filters
// ---------------------------------------------------------------------------

/// Criteria for filtered user listings.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Case-insensitive substring matched against name and username.
    /// Empty matches everyone.
    pub search_text: String,
    pub role: RoleFilter,
}

/// Produce the ordered subset of users matching the filter.
///
/// A user matches when name OR username contains the search text
/// case-insensitively AND the role criterion matches. Source order is
/// preserved; no re-sorting.
pub fn filter_users<'a>(users: &'a [User], filter: &UserFilter) -> Vec<&'a User> {
    let needle = filter.search_text.to_lowercase();
    users
        .iter()
        .filter(|u| {
            let text_match = needle.is_empty()
                || u.name.to_lowercase().contains(&needle)
                || u.username.to_lowercase().contains(&needle);
            text_match && filter.role.matches(u.role)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
