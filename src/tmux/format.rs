//! Scriptable tmux output formats
//!
//! Every listing is requested with an explicit `-F` format so parsing never depends
//! on tmux's human-readable output. Free-text fields (window names, pane titles) are
//! always placed last and split with `splitn` so they may contain the delimiter.

use chrono::{DateTime, Utc};

use crate::error::TmuxError;
use crate::session::{PaneRecord, SessionRecord, WindowRecord};

/// Field delimiter; tmux rewrites `:` in session names so it never appears in one
pub const DELIMITER: char = ':';

/// `name:windows:attached:created`
pub const SESSION_FORMAT: &str =
    "#{session_name}:#{session_windows}:#{session_attached}:#{session_created}";

/// `index:active:panes:name`
pub const WINDOW_FORMAT: &str = "#{window_index}:#{window_active}:#{window_panes}:#{window_name}";

/// `window:index:active:command:title`
pub const PANE_FORMAT: &str =
    "#{window_index}:#{pane_index}:#{pane_active}:#{pane_current_command}:#{pane_title}";

/// Format for `display-message -p` to resolve the invoking session
pub const CURRENT_SESSION_FORMAT: &str = "#{session_name}";

const SESSION_FIELDS: usize = 4;

/// Parse one `list-sessions` line; `is_current` is left false
pub fn parse_session_line(line: &str) -> Result<SessionRecord, TmuxError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();
    if fields.len() != SESSION_FIELDS {
        return Err(TmuxError::ParseError(format!(
            "expected {SESSION_FIELDS} fields, got {} in {line:?}",
            fields.len()
        )));
    }

    let name = fields[0];
    if name.is_empty() {
        return Err(TmuxError::ParseError(format!("empty session name in {line:?}")));
    }

    let windows = parse_number(fields[1], "window count", line)?;
    let attached = parse_flag(fields[2])
        .ok_or_else(|| TmuxError::ParseError(format!("bad attached flag in {line:?}")))?;
    let created_at = parse_epoch(fields[3])
        .ok_or_else(|| TmuxError::ParseError(format!("bad creation time in {line:?}")))?;

    Ok(SessionRecord {
        name: name.to_string(),
        windows,
        attached,
        created_at,
        is_current: false,
    })
}

/// Parse one `list-windows` line
pub fn parse_window_line(line: &str) -> Result<WindowRecord, TmuxError> {
    let fields: Vec<&str> = line.splitn(4, DELIMITER).collect();
    if fields.len() != 4 {
        return Err(TmuxError::ParseError(format!("malformed window line {line:?}")));
    }

    Ok(WindowRecord {
        index: parse_number(fields[0], "window index", line)?,
        active: parse_flag(fields[1]).unwrap_or(false),
        panes: parse_number(fields[2], "pane count", line)?,
        name: fields[3].to_string(),
    })
}

/// Parse one `list-panes -s` line
pub fn parse_pane_line(line: &str) -> Result<PaneRecord, TmuxError> {
    let fields: Vec<&str> = line.splitn(5, DELIMITER).collect();
    if fields.len() != 5 {
        return Err(TmuxError::ParseError(format!("malformed pane line {line:?}")));
    }

    Ok(PaneRecord {
        window_index: parse_number(fields[0], "window index", line)?,
        index: parse_number(fields[1], "pane index", line)?,
        active: parse_flag(fields[2]).unwrap_or(false),
        command: fields[3].to_string(),
        title: fields[4].to_string(),
    })
}

/// Interpret a tmux boolean-ish field.
///
/// `session_attached` is a client count on current tmux and `yes`/`no` on some
/// older builds; any non-zero count counts as attached.
pub fn parse_flag(value: &str) -> Option<bool> {
    let value = value.trim();
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" => Some(true),
        "no" | "false" => Some(false),
        other => other.parse::<u64>().ok().map(|n| n > 0),
    }
}

/// Parse an epoch-seconds timestamp
pub fn parse_epoch(value: &str) -> Option<DateTime<Utc>> {
    let secs = value.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0)
}

fn parse_number(value: &str, what: &str, line: &str) -> Result<u32, TmuxError> {
    value
        .trim()
        .parse()
        .map_err(|_| TmuxError::ParseError(format!("bad {what} {value:?} in {line:?}")))
}

/// Sanitize a string into a valid tmux session name (tmux's own rule for `.` and `:`)
pub fn sanitize_session_name(name: &str) -> String {
    name.chars()
        .map(|c| if c == '.' || c == ':' { '_' } else { c })
        .collect()
}

/// Exact-match target for a session (`=name` disables tmux's prefix matching)
pub fn exact_target(session_name: &str) -> String {
    format!("={session_name}")
}
