//! Session inspection
//!
//! Builds the window/pane tree of one session and summarises what runs in it.

use serde::Serialize;
use tracing::warn;

use crate::error::{Result, TmuxError};
use crate::session::{PaneRecord, SessionRecord, SessionSnapshot, SessionSummary, WindowRecord};
use crate::tmux::format::{parse_pane_line, parse_window_line};
use crate::tmux::Multiplexer;

/// Everything `inspect` shows about one session
#[derive(Debug, Clone, Serialize)]
pub struct SessionDetails {
    pub session: SessionRecord,
    pub windows: Vec<WindowDetails>,
    pub summary: SessionSummary,
}

/// A window with its panes
#[derive(Debug, Clone, Serialize)]
pub struct WindowDetails {
    pub window: WindowRecord,
    pub panes: Vec<PaneRecord>,
}

/// Query windows and panes for `session`
pub async fn inspect_session<M: Multiplexer + ?Sized>(
    mux: &M,
    session: &SessionRecord,
) -> Result<SessionDetails> {
    let windows = parse_lines(&mux.list_windows(&session.name).await?, parse_window_line);
    let panes = parse_lines(&mux.list_panes(&session.name).await?, parse_pane_line);

    let summary = SessionSummary::from_panes(&panes);

    let windows = windows
        .into_iter()
        .map(|window| {
            let panes = panes
                .iter()
                .filter(|p| p.window_index == window.index)
                .cloned()
                .collect();
            WindowDetails { window, panes }
        })
        .collect();

    Ok(SessionDetails {
        session: session.clone(),
        windows,
        summary,
    })
}

/// A session with what runs in it, as shown by `list`
#[derive(Debug, Clone, Serialize)]
pub struct SessionOverview {
    #[serde(flatten)]
    pub session: SessionRecord,
    /// `None` when the session could not be inspected
    pub summary: Option<SessionSummary>,
}

/// Summarise the panes of every listed session
///
/// A session that disappears between listing and inspection, or whose panes
/// cannot be listed, is kept without a summary.
pub async fn summarize_sessions<M: Multiplexer + ?Sized>(
    mux: &M,
    snapshot: &SessionSnapshot,
) -> Vec<SessionOverview> {
    let mut overviews = Vec::with_capacity(snapshot.records.len());
    for record in &snapshot.records {
        let summary = match mux.list_panes(&record.name).await {
            Ok(raw) => Some(SessionSummary::from_panes(&parse_lines(&raw, parse_pane_line))),
            Err(e) => {
                warn!("Could not inspect session {}: {}", record.name, e);
                None
            }
        };
        overviews.push(SessionOverview {
            session: record.clone(),
            summary,
        });
    }
    overviews
}

fn parse_lines<T>(raw: &str, parse: fn(&str) -> std::result::Result<T, TmuxError>) -> Vec<T> {
    raw.lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|line| match parse(line) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping line: {}", e);
                None
            }
        })
        .collect()
}
