//! Debounced auto-save task for a canvas editing session.
//!
//! Spawn via `tokio::spawn(autosave::run(editor, cancel))`. The task
//! sleeps until a mutation signal arrives, waits for the debounce window
//! to elapse with no further mutation (every new signal restarts the
//! full window), and persists the component snapshot. A mutation
//! racing an in-flight persist leaves a pending signal, so the loop
//! immediately debounces and saves again instead of stranding the
//! session unsaved.

use tokio_util::sync::CancellationToken;

use crate::canvas::CanvasEditor;

/// Run the auto-save loop for one editing session.
///
/// Runs until `cancel` is triggered. Persist failures are broadcast as
/// [`CanvasEvent::SaveFailed`](crate::events::CanvasEvent::SaveFailed)
/// by the editor and logged here; the session stays dirty and the next
/// mutation re-arms the loop.
pub async fn run(editor: CanvasEditor, cancel: CancellationToken) {
    let debounce = editor.debounce();
    tracing::info!(
        page_id = %editor.page_id(),
        debounce_ms = debounce.as_millis() as u64,
        "Autosave task started"
    );

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(page_id = %editor.page_id(), "Autosave task stopping");
                break;
            }
            _ = editor.wait_dirty() => {}
        }

        // Debounce: every further mutation restarts the full window.
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!(page_id = %editor.page_id(), "Autosave task stopping");
                    return;
                }
                _ = tokio::time::sleep(debounce) => break,
                _ = editor.wait_dirty() => {}
            }
        }

        if let Err(e) = editor.save_now().await {
            tracing::error!(
                page_id = %editor.page_id(),
                error = %e,
                "Autosave attempt failed"
            );
        }
    }
}
