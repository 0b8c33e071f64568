//! Shared test helpers

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use tmux_switcher::config::SessionLayout;
use tmux_switcher::error::{Result, TmuxError};
use tmux_switcher::tmux::Multiplexer;

/// A multiplexer that serves canned output and records every call
#[derive(Default)]
pub struct FakeMultiplexer {
    pub sessions_output: String,
    pub current: Option<String>,
    pub fail_listing: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeMultiplexer {
    pub fn new(lines: &[&str], current: Option<&str>) -> Self {
        Self {
            sessions_output: lines.iter().map(|l| format!("{l}\n")).collect(),
            current: current.map(String::from),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change which session a client sees
    pub fn mutating_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with("switch") || c.starts_with("create"))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn session_names(&self) -> Vec<String> {
        self.sessions_output
            .lines()
            .filter_map(|l| l.split(':').next())
            .map(String::from)
            .collect()
    }
}

#[async_trait]
impl Multiplexer for FakeMultiplexer {
    async fn list_sessions(&self) -> Result<String> {
        self.record("list-sessions".to_string());
        if self.fail_listing {
            return Err(TmuxError::ServerNotRunning.into());
        }
        Ok(self.sessions_output.clone())
    }

    async fn current_session(&self) -> Result<Option<String>> {
        self.record("current-session".to_string());
        Ok(self.current.clone())
    }

    async fn switch_to(&self, session_name: &str) -> Result<()> {
        self.record(format!("switch {session_name}"));
        Ok(())
    }

    async fn has_session(&self, session_name: &str) -> Result<bool> {
        self.record(format!("has {session_name}"));
        Ok(self.session_names().iter().any(|n| n == session_name))
    }

    async fn create_session(
        &self,
        session_name: &str,
        working_dir: &Path,
        layout: &SessionLayout,
    ) -> Result<()> {
        self.record(format!(
            "create {session_name} {} {}",
            working_dir.display(),
            layout.pane_count()
        ));
        Ok(())
    }

    async fn list_windows(&self, session_name: &str) -> Result<String> {
        self.record(format!("windows {session_name}"));
        Ok("0:1:2:editor\n1:0:1:logs: tail\n".to_string())
    }

    async fn list_panes(&self, session_name: &str) -> Result<String> {
        self.record(format!("panes {session_name}"));
        Ok("0:0:1:nvim:main.rs\n0:1:0:claude:\n1:0:1:zsh:host\n".to_string())
    }
}
