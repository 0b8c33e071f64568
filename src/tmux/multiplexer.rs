//! The seam between the menu logic and the tmux CLI
//!
//! Listing methods return raw `-F` output; parsing lives in [`crate::session`] so
//! that tests can drive the whole pipeline with canned text.

use std::path::Path;

use async_trait::async_trait;

use crate::config::SessionLayout;
use crate::error::Result;

/// Operations the tool needs from a terminal multiplexer.
///
/// None of them destroys a session.
#[async_trait]
pub trait Multiplexer: Send + Sync {
    /// Raw `list-sessions` output in [`super::SESSION_FORMAT`]
    async fn list_sessions(&self) -> Result<String>;

    /// Name of the session the tool was invoked from, `None` outside tmux
    async fn current_session(&self) -> Result<Option<String>>;

    /// Make `session_name` the active session for this terminal
    async fn switch_to(&self, session_name: &str) -> Result<()>;

    /// Whether a session with exactly this name exists
    async fn has_session(&self, session_name: &str) -> Result<bool>;

    /// Create a detached session rooted at `working_dir`
    async fn create_session(
        &self,
        session_name: &str,
        working_dir: &Path,
        layout: &SessionLayout,
    ) -> Result<()>;

    /// Raw `list-windows` output in [`super::WINDOW_FORMAT`]
    async fn list_windows(&self, session_name: &str) -> Result<String>;

    /// Raw `list-panes -s` output in [`super::PANE_FORMAT`]
    async fn list_panes(&self, session_name: &str) -> Result<String>;
}
