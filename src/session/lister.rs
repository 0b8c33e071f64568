//! Session listing
//!
//! Turns raw `list-sessions` output into a [`SessionSnapshot`]. Malformed lines are
//! logged and skipped; the listing only fails when tmux itself fails or when there
//! was output but not a single line could be parsed.

use tracing::{debug, instrument, warn};

use crate::error::{Result, TmuxError};
use crate::session::{SessionRecord, SessionSnapshot};
use crate::tmux::format::parse_session_line;
use crate::tmux::Multiplexer;

/// List all sessions and mark the one the tool runs in
#[instrument(skip(mux))]
pub async fn list_sessions<M: Multiplexer + ?Sized>(mux: &M) -> Result<SessionSnapshot> {
    let raw = mux.list_sessions().await?;

    let current = match mux.current_session().await {
        Ok(current) => current,
        Err(e) => {
            warn!("Could not determine the current session: {}", e);
            None
        }
    };
    debug!("current session: {:?}", current);

    let records = parse_sessions(&raw, current.as_deref())?;
    Ok(SessionSnapshot { records, current })
}

/// Parse `list-sessions` output, preserving order
pub fn parse_sessions(raw: &str, current: Option<&str>) -> Result<Vec<SessionRecord>> {
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in raw.lines().filter(|l| !l.trim().is_empty()) {
        match parse_session_line(line) {
            Ok(mut record) => {
                record.is_current = current == Some(record.name.as_str());
                records.push(record);
            }
            Err(e) => {
                warn!("Skipping session line: {}", e);
                skipped += 1;
            }
        }
    }

    if records.is_empty() && skipped > 0 {
        return Err(TmuxError::ParseError(format!(
            "none of the {skipped} session line(s) could be parsed"
        ))
        .into());
    }

    Ok(records)
}
