//! Core session types
//!
//! Immutable snapshots of tmux state:
//! - `SessionRecord` - one parsed line of `list-sessions`
//! - `SessionSnapshot` - the ordered record list plus the resolved current session
//! - `WindowRecord` / `PaneRecord` - the window and pane tree used by `inspect`

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One tmux session as reported by `list-sessions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session name, unique among live sessions
    pub name: String,
    /// Number of windows in the session
    pub windows: u32,
    /// Whether at least one client is attached
    pub attached: bool,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Whether this is the session the tool was invoked from
    pub is_current: bool,
}

impl SessionRecord {
    /// Status of the session relative to the invoking client
    pub fn status(&self) -> SessionStatus {
        if self.is_current {
            SessionStatus::Current
        } else if self.attached {
            SessionStatus::Attached
        } else {
            SessionStatus::Detached
        }
    }

    /// Creation time in the local timezone, formatted for display
    pub fn created_display(&self) -> String {
        self.created_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string()
    }

    /// "1 window" / "3 windows"
    pub fn windows_display(&self) -> String {
        if self.windows == 1 {
            "1 window".to_string()
        } else {
            format!("{} windows", self.windows)
        }
    }
}

/// Status of a session from the point of view of the invoking client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The session the tool runs inside
    Current,
    /// Another client is attached
    Attached,
    /// No client attached
    Detached,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::Attached => write!(f, "attached"),
            Self::Detached => write!(f, "detached"),
        }
    }
}

/// All sessions at one point in time, plus which one is ours
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Records in the order tmux returned them
    pub records: Vec<SessionRecord>,
    /// Name of the invoking session, if the tool runs inside tmux
    pub current: Option<String>,
}

impl SessionSnapshot {
    /// The record marked current, if any
    pub fn current_record(&self) -> Option<&SessionRecord> {
        self.records.iter().find(|r| r.is_current)
    }

    /// Records offered in the switch menu: everything except the current session
    pub fn switch_targets(&self) -> Vec<&SessionRecord> {
        self.records.iter().filter(|r| !r.is_current).collect()
    }

    /// Look up a record by exact name
    pub fn find(&self, name: &str) -> Option<&SessionRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One window of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowRecord {
    pub index: u32,
    pub name: String,
    pub active: bool,
    pub panes: u32,
}

/// One pane of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaneRecord {
    /// Index of the window the pane belongs to
    pub window_index: u32,
    pub index: u32,
    pub active: bool,
    /// Foreground command (`#{pane_current_command}`)
    pub command: String,
    pub title: String,
}

impl PaneRecord {
    /// Pane title, or a placeholder when tmux reports none
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// Kind of application running in a pane
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AppKind {
    Claude,
    Python,
    Node,
    Editor,
    Browser,
    Docker,
    Files,
    Monitor,
    Shell,
    Other,
}

impl AppKind {
    /// Classify a pane's foreground command; `None` for an empty command
    pub fn classify(command: &str) -> Option<Self> {
        let command = command.trim();
        if command.is_empty() {
            return None;
        }

        let kind = match command {
            "bash" | "zsh" | "sh" | "fish" => Self::Shell,
            "vim" | "nvim" | "vi" | "nano" | "hx" | "emacs" => Self::Editor,
            "claude" => Self::Claude,
            "python" | "python3" | "ipython" => Self::Python,
            "node" | "npm" | "bun" | "yarn" => Self::Node,
            "lynx" | "carbonyl" | "w3m" => Self::Browser,
            "ranger" => Self::Files,
            "htop" | "top" | "btop" => Self::Monitor,
            "docker" => Self::Docker,
            _ => Self::Other,
        };
        Some(kind)
    }

    /// Short label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Python => "python",
            Self::Node => "node",
            Self::Editor => "editor",
            Self::Browser => "browser",
            Self::Docker => "docker",
            Self::Files => "files",
            Self::Monitor => "monitor",
            Self::Shell => "shell",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What is running across a session's panes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub total_panes: usize,
    pub app_counts: BTreeMap<AppKind, usize>,
    pub unique_commands: BTreeSet<String>,
}

impl SessionSummary {
    /// Build a summary from a session's panes
    pub fn from_panes(panes: &[PaneRecord]) -> Self {
        let mut summary = Self::default();
        for pane in panes {
            summary.total_panes += 1;
            if let Some(kind) = AppKind::classify(&pane.command) {
                *summary.app_counts.entry(kind).or_default() += 1;
                summary.unique_commands.insert(pane.command.trim().to_string());
            }
        }
        summary
    }

    /// "2 claude, 1 editor, 3 shell"
    pub fn describe(&self) -> String {
        join_counts(self.app_counts.iter())
    }

    /// Compact tags for list lines, leaving out shells and unknown commands
    pub fn tags(&self) -> String {
        join_counts(
            self.app_counts
                .iter()
                .filter(|(kind, _)| !matches!(kind, AppKind::Shell | AppKind::Other)),
        )
    }

    /// Add another session's counts into this one
    pub fn merge(&mut self, other: &SessionSummary) {
        self.total_panes += other.total_panes;
        for (kind, count) in &other.app_counts {
            *self.app_counts.entry(*kind).or_default() += count;
        }
        self.unique_commands
            .extend(other.unique_commands.iter().cloned());
    }
}

fn join_counts<'a>(counts: impl Iterator<Item = (&'a AppKind, &'a usize)>) -> String {
    counts
        .map(|(kind, count)| format!("{count} {kind}"))
        .collect::<Vec<_>>()
        .join(", ")
}
