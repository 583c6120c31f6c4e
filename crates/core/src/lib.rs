//! Domain logic for the pageforge portal: page access computation and
//! the canvas component model.
//!
//! This crate is sans-IO (zero internal deps, no async) so the same
//! logic can back the editor sessions, test doubles, and any future CLI
//! tooling:
//!
//! - [`access`] — derived (user, page) access grid, user listing filters,
//!   and toggle-set computation.
//! - [`canvas`] — canvas component model, kind defaults, placement, and
//!   partial-update validation.
//! - [`save_state`] — the saved/unsaved/saving auto-save state machine
//!   with superseded-save detection.
//! - [`audit`] — audit action vocabulary and record type.
//! - [`roles`] — directory role vocabulary.

pub mod access;
pub mod audit;
pub mod canvas;
pub mod error;
pub mod roles;
pub mod save_state;
pub mod types;
