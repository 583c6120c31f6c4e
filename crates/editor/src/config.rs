//! Session configuration.

use std::time::Duration;

/// Default debounce window between the last mutation and the auto-save
/// attempt.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(2);

/// Environment variable overriding the debounce window, in milliseconds.
const DEBOUNCE_ENV_VAR: &str = "AUTOSAVE_DEBOUNCE_MS";

/// Configuration for the canvas auto-save task.
#[derive(Debug, Clone)]
pub struct AutosaveConfig {
    /// How long the session must stay mutation-free before a save fires.
    pub debounce: Duration,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl AutosaveConfig {
    /// Read the debounce window from `AUTOSAVE_DEBOUNCE_MS`, falling back
    /// to [`DEFAULT_DEBOUNCE`] when unset or unparseable.
    pub fn from_env() -> Self {
        let debounce = std::env::var(DEBOUNCE_ENV_VAR)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE);
        Self { debounce }
    }
}
