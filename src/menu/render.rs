//! Plain-text rendering of menus, listings and session details

use std::fmt::Display;
use std::io::{self, Write};

use crate::menu::Theme;
use crate::session::{
    SessionDetails, SessionOverview, SessionRecord, SessionSnapshot, SessionStatus, SessionSummary,
};

/// Width of the name column in session lists
const NAME_WIDTH: usize = 20;

/// Print a section header such as `[TMUX SESSIONS]`
pub fn render_header<W: Write>(out: &mut W, theme: &Theme, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", theme.strong(format!("[{title}]"), theme.header))?;
    writeln!(out)
}

/// Render the switch menu: current-session banner, then the numbered targets
pub fn render_menu<W: Write>(
    out: &mut W,
    theme: &Theme,
    snapshot: &SessionSnapshot,
) -> io::Result<()> {
    render_header(out, theme, "TMUX SESSIONS")?;

    match (snapshot.current_record(), &snapshot.current) {
        (Some(current), _) => writeln!(
            out,
            "Current: {}  ({}, {}, created {})",
            theme.strong(&current.name, theme.current),
            current.windows_display(),
            attached_label(current),
            current.created_display(),
        )?,
        // Inside tmux, but the session lives on another server
        (None, Some(name)) => writeln!(
            out,
            "Current: {}  {}",
            theme.strong(name, theme.current),
            theme.paint("(not on this server)", theme.hint),
        )?,
        (None, None) => writeln!(out, "{}", theme.paint("Not inside a tmux session.", theme.hint))?,
    }
    writeln!(out)?;

    for (i, record) in snapshot.switch_targets().into_iter().enumerate() {
        let number = theme.paint(format!("[{}]", i + 1), theme.index);
        writeln!(out, " {number} {}", session_line(theme, record))?;
    }

    Ok(())
}

/// Render every session with its pane and app counts, marking the current one
pub fn render_session_list<W: Write>(
    out: &mut W,
    theme: &Theme,
    sessions: &[SessionOverview],
) -> io::Result<()> {
    if sessions.is_empty() {
        return writeln!(out, "  (no sessions)");
    }

    let mut total = SessionSummary::default();
    for overview in sessions {
        let record = &overview.session;
        let marker = if record.is_current { "*" } else { " " };
        write!(
            out,
            " {} {}",
            theme.paint(marker, theme.current),
            session_line(theme, record)
        )?;

        if let Some(summary) = &overview.summary {
            write!(out, "  ({}w/{}p)", record.windows, summary.total_panes)?;
            let tags = summary.tags();
            if !tags.is_empty() {
                write!(out, " {}", theme.paint(format!("[{tags}]"), theme.attached))?;
            }
            total.merge(summary);
        }
        writeln!(out)?;
    }

    if !total.app_counts.is_empty() {
        writeln!(out)?;
        writeln!(out, "Apps: {}", total.describe())?;
    }
    Ok(())
}

/// Render a numbered list of arbitrary items (directory fallback menu)
pub fn render_numbered<W: Write, T: Display>(
    out: &mut W,
    theme: &Theme,
    items: &[T],
) -> io::Result<()> {
    for (i, item) in items.iter().enumerate() {
        writeln!(out, " {} {item}", theme.paint(format!("[{}]", i + 1), theme.index))?;
    }
    Ok(())
}

/// Render the window/pane tree of one session
pub fn render_details<W: Write>(
    out: &mut W,
    theme: &Theme,
    details: &SessionDetails,
) -> io::Result<()> {
    let session = &details.session;
    render_header(out, theme, "SESSION DETAILS")?;

    writeln!(out, "{}", theme.strong(&session.name, status_color(theme, session)))?;
    writeln!(out, "Status:  {}", session.status())?;
    writeln!(out, "Created: {}", session.created_display())?;
    writeln!(
        out,
        "Size:    {}, {} pane(s)",
        session.windows_display(),
        details.summary.total_panes
    )?;
    if !details.summary.app_counts.is_empty() {
        writeln!(out, "Apps:    {}", details.summary.describe())?;
    }

    for entry in &details.windows {
        let window = &entry.window;
        let active = if window.active { " (active)" } else { "" };
        writeln!(out)?;
        writeln!(
            out,
            "  Window {}: {} ({} panes){}",
            window.index,
            theme.paint(&window.name, theme.header),
            window.panes,
            active
        )?;
        for pane in &entry.panes {
            let marker = if pane.active { "*" } else { "-" };
            writeln!(
                out,
                "    {marker} {} [{}]",
                pane.display_title(),
                theme.paint(&pane.command, theme.hint)
            )?;
        }
    }

    Ok(())
}

/// Print a one-line error and an optional hint
pub fn render_error<W: Write>(
    out: &mut W,
    theme: &Theme,
    message: &str,
    hint: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "{} {message}", theme.strong("error:", theme.error))?;
    if let Some(hint) = hint {
        writeln!(out, "  {}", theme.paint(format!("hint: {hint}"), theme.hint))?;
    }
    Ok(())
}

fn session_line(theme: &Theme, record: &SessionRecord) -> String {
    let name = format!("{:<width$}", record.name, width = NAME_WIDTH);
    format!(
        "{} {:<10} {:<9} {}",
        theme.paint(name, status_color(theme, record)),
        record.windows_display(),
        attached_label(record),
        theme.paint(format!("created {}", record.created_display()), theme.hint),
    )
}

fn attached_label(record: &SessionRecord) -> &'static str {
    if record.attached { "attached" } else { "detached" }
}

fn status_color(theme: &Theme, record: &SessionRecord) -> crossterm::style::Color {
    match record.status() {
        SessionStatus::Current => theme.current,
        SessionStatus::Attached => theme.attached,
        SessionStatus::Detached => theme.detached,
    }
}
