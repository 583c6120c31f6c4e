//! Stateful editor sessions over the pageforge directory.
//!
//! Two independent units, each a view over directory state plus local
//! edits:
//!
//! - [`AccessMatrix`] — the per-(user, page) access grid with filtered
//!   user listings and a two-phase toggle operation.
//! - [`CanvasEditor`] — a page's canvas editing session with
//!   add/update/delete, selection, preview mode, and debounced
//!   auto-save driven by [`autosave::run`].
//!
//! Both units take an injected [`Directory`](pageforge_directory::Directory)
//! and broadcast typed change events.

pub mod access_matrix;
pub mod autosave;
pub mod canvas;
pub mod config;
pub mod error;
pub mod events;

pub use access_matrix::AccessMatrix;
pub use canvas::CanvasEditor;
pub use config::AutosaveConfig;
pub use error::{EditorError, EditorResult};
pub use events::{CanvasEvent, MatrixEvent};
