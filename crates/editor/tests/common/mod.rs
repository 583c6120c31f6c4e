#![allow(dead_code)]

//! Shared test doubles and fixtures for the editor integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use pageforge_core::access::{Page, User};
use pageforge_core::audit::AuditRecord;
use pageforge_core::canvas::{CanvasComponent, ComponentKind};
use pageforge_core::roles::Role;
use pageforge_core::types::PageId;
use pageforge_directory::{Directory, DirectoryError};

/// One recorded `persist_page_layout` call.
#[derive(Debug, Clone)]
pub struct PersistCall {
    pub page_id: String,
    pub components: Vec<CanvasComponent>,
}

/// Scriptable directory double: records every call, can fail upcoming
/// calls, and can delay persist calls to open a race window.
pub struct RecordingDirectory {
    users: Mutex<Vec<User>>,
    pages: Vec<Page>,
    persist_calls: Mutex<Vec<PersistCall>>,
    assignment_calls: Mutex<Vec<(String, Vec<PageId>)>>,
    audit: Mutex<Vec<AuditRecord>>,
    fail_persists: AtomicUsize,
    fail_assignments: AtomicUsize,
    persist_attempts: AtomicUsize,
    persist_delay: Mutex<Option<Duration>>,
}

impl RecordingDirectory {
    pub fn new(users: Vec<User>, pages: Vec<Page>) -> Self {
        Self {
            users: Mutex::new(users),
            pages,
            persist_calls: Mutex::new(Vec::new()),
            assignment_calls: Mutex::new(Vec::new()),
            audit: Mutex::new(Vec::new()),
            fail_persists: AtomicUsize::new(0),
            fail_assignments: AtomicUsize::new(0),
            persist_attempts: AtomicUsize::new(0),
            persist_delay: Mutex::new(None),
        }
    }

    /// Fail the next `n` persist calls with `DirectoryError::Unavailable`.
    pub fn fail_next_persists(&self, n: usize) {
        self.fail_persists.store(n, Ordering::SeqCst);
    }

    /// Fail the next `n` assignment calls with `DirectoryError::Unavailable`.
    pub fn fail_next_assignments(&self, n: usize) {
        self.fail_assignments.store(n, Ordering::SeqCst);
    }

    /// Delay every persist call, keeping a save in flight for `delay`.
    pub fn set_persist_delay(&self, delay: Duration) {
        *self.persist_delay.lock().unwrap() = Some(delay);
    }

    pub fn persist_calls(&self) -> Vec<PersistCall> {
        self.persist_calls.lock().unwrap().clone()
    }

    /// Successful persist calls.
    pub fn persist_count(&self) -> usize {
        self.persist_calls.lock().unwrap().len()
    }

    /// Persist calls attempted, including injected failures.
    pub fn persist_attempts(&self) -> usize {
        self.persist_attempts.load(Ordering::SeqCst)
    }

    pub fn assignment_calls(&self) -> Vec<(String, Vec<PageId>)> {
        self.assignment_calls.lock().unwrap().clone()
    }

    pub fn audit_actions(&self) -> Vec<String> {
        self.audit
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.action.clone())
            .collect()
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl Directory for RecordingDirectory {
    async fn list_users(&self) -> Result<Vec<User>, DirectoryError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn list_pages(&self) -> Result<Vec<Page>, DirectoryError> {
        Ok(self.pages.clone())
    }

    async fn set_user_page_assignments(
        &self,
        user_id: &str,
        page_ids: Vec<PageId>,
    ) -> Result<(), DirectoryError> {
        if Self::take_failure(&self.fail_assignments) {
            return Err(DirectoryError::Unavailable("injected failure".to_string()));
        }
        self.assignment_calls
            .lock()
            .unwrap()
            .push((user_id.to_string(), page_ids.clone()));
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| DirectoryError::UnknownUser(user_id.to_string()))?;
        user.assigned_pages = page_ids;
        Ok(())
    }

    async fn persist_page_layout(
        &self,
        page_id: &str,
        components: &[CanvasComponent],
    ) -> Result<(), DirectoryError> {
        self.persist_attempts.fetch_add(1, Ordering::SeqCst);
        let delay = *self.persist_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if Self::take_failure(&self.fail_persists) {
            return Err(DirectoryError::Unavailable("injected failure".to_string()));
        }
        self.persist_calls.lock().unwrap().push(PersistCall {
            page_id: page_id.to_string(),
            components: components.to_vec(),
        });
        Ok(())
    }

    async fn record_audit_event(&self, record: AuditRecord) {
        self.audit.lock().unwrap().push(record);
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn user(id: &str, name: &str, username: &str, role: Role, pages: &[&str]) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        username: username.to_string(),
        role,
        assigned_pages: pages.iter().map(|p| p.to_string()).collect(),
    }
}

pub fn page(id: &str, title: &str, kind: ComponentKind) -> Page {
    Page {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        embed_url: None,
        html_content: None,
    }
}

/// Four users covering every role, with "ann" appearing in two names.
pub fn sample_users() -> Vec<User> {
    vec![
        user("u-ann", "Ann Chovey", "annc", Role::User, &["p1"]),
        user("u-admin", "Ada Admin", "ada", Role::Admin, &[]),
        user("u-joanne", "Joanne Park", "jpark", Role::User, &[]),
        user("u-dev", "Devon Ward", "devon", Role::Developer, &[]),
    ]
}

pub fn sample_pages() -> Vec<Page> {
    vec![
        page("p1", "Sales Dashboard", ComponentKind::PowerBi),
        page("p2", "Budget Sheet", ComponentKind::Spreadsheet),
        page("p3", "Welcome", ComponentKind::Html),
    ]
}
