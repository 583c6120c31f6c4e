//! The canvas editing session.
//!
//! [`CanvasEditor`] is a clonable handle over shared session state so the
//! auto-save task and the event-driven caller can work against the same
//! component list. Mutations are applied synchronously under the state
//! lock and in event order; only the persisted snapshot catches up
//! asynchronously (see [`crate::autosave`]).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex, Notify};

use pageforge_core::audit::{action_types, AuditRecord};
use pageforge_core::canvas::{self, CanvasComponent, ComponentKind, ComponentPatch, Position};
use pageforge_core::error::CoreError;
use pageforge_core::save_state::{SaveOutcome, SaveStatus, SaveTracker};
use pageforge_core::types::{ComponentId, PageId, UserId};
use pageforge_directory::Directory;

use crate::config::AutosaveConfig;
use crate::error::{EditorError, EditorResult};
use crate::events::{CanvasEvent, EVENT_CHANNEL_CAPACITY};

struct CanvasState {
    components: Vec<CanvasComponent>,
    selected: Option<ComponentId>,
    preview: bool,
    tracker: SaveTracker,
}

struct Inner {
    page_id: PageId,
    actor: UserId,
    directory: Arc<dyn Directory>,
    config: AutosaveConfig,
    state: Mutex<CanvasState>,
    /// Nudged on every mutation; the auto-save task waits on it.
    dirty: Notify,
    events: broadcast::Sender<CanvasEvent>,
}

/// Clonable handle to one page's editing session.
#[derive(Clone)]
pub struct CanvasEditor {
    inner: Arc<Inner>,
}

impl CanvasEditor {
    /// Open an editing session over an existing component list.
    pub fn new(
        page_id: impl Into<PageId>,
        actor: impl Into<UserId>,
        components: Vec<CanvasComponent>,
        directory: Arc<dyn Directory>,
        config: AutosaveConfig,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                page_id: page_id.into(),
                actor: actor.into(),
                directory,
                config,
                state: Mutex::new(CanvasState {
                    components,
                    selected: None,
                    preview: false,
                    tracker: SaveTracker::new(),
                }),
                dirty: Notify::new(),
                events,
            }),
        }
    }

    pub fn page_id(&self) -> &str {
        &self.inner.page_id
    }

    /// The configured debounce window.
    pub fn debounce(&self) -> Duration {
        self.inner.config.debounce
    }

    /// Subscribe to session events.
    pub fn subscribe(&self) -> broadcast::Receiver<CanvasEvent> {
        self.inner.events.subscribe()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a component of the given kind.
    ///
    /// `at` carries drop coordinates when the component was dragged onto
    /// the canvas; they are clamped into the placement region. Without
    /// coordinates placement is randomized. Returns the new component.
    pub async fn add_component(
        &self,
        kind: ComponentKind,
        at: Option<Position>,
    ) -> CanvasComponent {
        let component = CanvasComponent::new(kind, at);
        {
            let mut state = self.inner.state.lock().await;
            state.components.push(component.clone());
            state.tracker.on_mutation();
        }
        self.mark_mutated();

        self.inner
            .directory
            .record_audit_event(AuditRecord::new(
                &self.inner.actor,
                action_types::COMPONENT_ADD,
                format!("{} component {}", kind.as_str(), component.id),
            ))
            .await;
        tracing::debug!(
            page_id = %self.inner.page_id,
            component_id = %component.id,
            kind = kind.as_str(),
            "Component added"
        );
        component
    }

    /// Merge a partial update into the matching component.
    ///
    /// Unknown ids are a reported no-op (`NotFound`). Size patches are
    /// validated before anything changes.
    pub async fn update_component(
        &self,
        id: ComponentId,
        patch: &ComponentPatch,
    ) -> EditorResult<()> {
        {
            let mut state = self.inner.state.lock().await;
            let Some(component) = state.components.iter_mut().find(|c| c.id == id) else {
                return Err(EditorError::Core(CoreError::NotFound {
                    entity: "Component",
                    id: id.to_string(),
                }));
            };
            canvas::apply_patch(component, patch)?;
            state.tracker.on_mutation();
        }
        self.mark_mutated();
        Ok(())
    }

    /// Remove the matching component, clearing the selection if it was
    /// selected.
    pub async fn delete_component(&self, id: ComponentId) -> EditorResult<()> {
        {
            let mut state = self.inner.state.lock().await;
            let Some(index) = state.components.iter().position(|c| c.id == id) else {
                return Err(EditorError::Core(CoreError::NotFound {
                    entity: "Component",
                    id: id.to_string(),
                }));
            };
            state.components.remove(index);
            if state.selected == Some(id) {
                state.selected = None;
            }
            state.tracker.on_mutation();
        }
        self.mark_mutated();

        self.inner
            .directory
            .record_audit_event(AuditRecord::new(
                &self.inner.actor,
                action_types::COMPONENT_DELETE,
                format!("component {id}"),
            ))
            .await;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Selection and preview
    // -----------------------------------------------------------------------

    /// Select a component (`Some`) or clear the selection (`None`).
    ///
    /// At most one component is selected at a time. Selecting is not
    /// available in preview mode; clearing always is.
    pub async fn select(&self, id: Option<ComponentId>) -> EditorResult<()> {
        let mut state = self.inner.state.lock().await;
        if let Some(id) = id {
            if state.preview {
                return Err(EditorError::PreviewMode("component selection".to_string()));
            }
            if !state.components.iter().any(|c| c.id == id) {
                return Err(EditorError::Core(CoreError::NotFound {
                    entity: "Component",
                    id: id.to_string(),
                }));
            }
        }
        state.selected = id;
        Ok(())
    }

    /// Flip preview mode. Entering preview clears the selection.
    /// Returns `true` when the session is now in preview.
    pub async fn toggle_preview(&self) -> bool {
        let entering = {
            let mut state = self.inner.state.lock().await;
            state.preview = !state.preview;
            if state.preview {
                state.selected = None;
            }
            state.preview
        };

        let action = if entering {
            action_types::PREVIEW_ENTER
        } else {
            action_types::PREVIEW_EXIT
        };
        self.inner
            .directory
            .record_audit_event(AuditRecord::new(
                &self.inner.actor,
                action,
                format!("page {}", self.inner.page_id),
            ))
            .await;
        entering
    }

    // -----------------------------------------------------------------------
    // Snapshots
    // -----------------------------------------------------------------------

    pub async fn components(&self) -> Vec<CanvasComponent> {
        self.inner.state.lock().await.components.clone()
    }

    pub async fn selected(&self) -> Option<ComponentId> {
        self.inner.state.lock().await.selected
    }

    pub async fn preview(&self) -> bool {
        self.inner.state.lock().await.preview
    }

    pub async fn save_status(&self) -> SaveStatus {
        self.inner.state.lock().await.tracker.status()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Persist the current component list immediately, outside the
    /// debounce window.
    ///
    /// On failure the status rolls back to unsaved, a
    /// [`CanvasEvent::SaveFailed`] is broadcast, and the directory error
    /// is returned.
    pub async fn save_now(&self) -> EditorResult<SaveOutcome> {
        let (epoch, snapshot) = {
            let mut state = self.inner.state.lock().await;
            (state.tracker.begin_save(), state.components.clone())
        };
        let _ = self.inner.events.send(CanvasEvent::SaveStarted);

        match self
            .inner
            .directory
            .persist_page_layout(&self.inner.page_id, &snapshot)
            .await
        {
            Ok(()) => {
                let outcome = {
                    let mut state = self.inner.state.lock().await;
                    state.tracker.complete_save(epoch, true)
                };
                let event = match outcome {
                    SaveOutcome::Superseded => CanvasEvent::SaveSuperseded,
                    _ => CanvasEvent::Saved,
                };
                let _ = self.inner.events.send(event);

                self.inner
                    .directory
                    .record_audit_event(AuditRecord::new(
                        &self.inner.actor,
                        action_types::LAYOUT_SAVE,
                        format!("page {} ({} components)", self.inner.page_id, snapshot.len()),
                    ))
                    .await;
                tracing::info!(
                    page_id = %self.inner.page_id,
                    components = snapshot.len(),
                    outcome = ?outcome,
                    "Page layout persisted"
                );
                Ok(outcome)
            }
            Err(e) => {
                {
                    let mut state = self.inner.state.lock().await;
                    state.tracker.complete_save(epoch, false);
                }
                let _ = self.inner.events.send(CanvasEvent::SaveFailed {
                    reason: e.to_string(),
                });
                tracing::error!(
                    page_id = %self.inner.page_id,
                    error = %e,
                    "Page layout persist failed"
                );
                Err(e.into())
            }
        }
    }

    /// Wait until the next mutation signal. Used by the auto-save task.
    pub(crate) async fn wait_dirty(&self) {
        self.inner.dirty.notified().await;
    }

    fn mark_mutated(&self) {
        self.inner.dirty.notify_one();
        let _ = self.inner.events.send(CanvasEvent::Mutated);
    }
}
