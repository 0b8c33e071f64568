//! Tmux command executor
//!
//! Runs the `tmux` binary one command at a time and maps its failures onto
//! [`TmuxError`]. Calls block until tmux exits; there is no timeout because tmux is
//! a trusted local daemon.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use super::format::{
    exact_target, CURRENT_SESSION_FORMAT, PANE_FORMAT, SESSION_FORMAT, WINDOW_FORMAT,
};
use super::Multiplexer;
use crate::config::{Config, SessionLayout};
use crate::error::{Error, Result, TmuxError};

/// Default tmux binary
pub const DEFAULT_TMUX_PROGRAM: &str = "tmux";

/// Fixed size for detached sessions so layouts have room to split
const DETACHED_WIDTH: &str = "200";
const DETACHED_HEIGHT: &str = "50";

/// Where the tool runs relative to tmux, read from the environment tmux sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TmuxContext {
    /// `$TMUX` is set: we are inside a tmux client
    pub inside: bool,
    /// `$TMUX_PANE`, the pane the tool was started from
    pub pane: Option<String>,
}

impl TmuxContext {
    /// Read `TMUX` and `TMUX_PANE`
    pub fn from_env() -> Self {
        let inside = std::env::var_os("TMUX").is_some_and(|v| !v.is_empty());
        let pane = std::env::var("TMUX_PANE").ok().filter(|p| !p.is_empty());
        Self { inside, pane }
    }

    /// A context for running outside any tmux client
    pub fn outside() -> Self {
        Self::default()
    }
}

/// Tmux command executor
#[derive(Debug, Clone)]
pub struct TmuxExecutor {
    /// Binary to invoke
    program: String,
    /// Server socket name passed as `-L`
    socket_name: Option<String>,
    /// Invocation context
    context: TmuxContext,
}

impl TmuxExecutor {
    /// Create an executor for the default binary and server
    pub fn new(context: TmuxContext) -> Self {
        Self {
            program: DEFAULT_TMUX_PROGRAM.to_string(),
            socket_name: None,
            context,
        }
    }

    /// Create an executor from the user's configuration
    pub fn from_config(config: &Config, context: TmuxContext) -> Self {
        Self::new(context)
            .with_program(&config.tmux_program)
            .with_socket_name(config.socket_name.clone())
    }

    /// Use a different tmux binary
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Talk to a named server socket (`tmux -L <name>`)
    pub fn with_socket_name(mut self, socket_name: Option<String>) -> Self {
        self.socket_name = socket_name;
        self
    }

    /// Check if tmux is installed and accessible
    pub async fn check_installed(&self) -> Result<String> {
        let output = Command::new(&self.program)
            .arg("-V")
            .output()
            .await
            .map_err(|_| TmuxError::NotInstalled)?;

        if output.status.success() {
            let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
            debug!("tmux version: {}", version);
            Ok(version)
        } else {
            Err(TmuxError::NotInstalled.into())
        }
    }

    fn command(&self, args: &[&OsStr]) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(socket) = &self.socket_name {
            cmd.args(["-L", socket]);
        }
        cmd.args(args);
        cmd
    }

    fn describe(&self, args: &[&OsStr]) -> String {
        let mut parts = vec![self.program.clone()];
        if let Some(socket) = &self.socket_name {
            parts.extend(["-L".to_string(), socket.clone()]);
        }
        parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
        parts.join(" ")
    }

    /// Execute a tmux command and return its stdout
    pub async fn execute(&self, args: &[&str]) -> Result<String> {
        self.execute_os(&os_args(args)).await
    }

    /// Like [`execute`](Self::execute), for arguments that are paths
    #[instrument(skip(self))]
    pub async fn execute_os(&self, args: &[&OsStr]) -> Result<String> {
        let command_line = self.describe(args);
        debug!("running: {}", command_line);

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| spawn_error(e, &command_line))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        debug!("raw output ({}): {:?}", output.status, stdout);

        if output.status.success() {
            Ok(stdout)
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            Err(classify_failure(command_line, stderr).into())
        }
    }

    /// Execute a tmux command that takes over the terminal (e.g. `attach-session`)
    #[instrument(skip(self))]
    pub async fn execute_interactive(&self, args: &[&str]) -> Result<()> {
        let args = os_args(args);
        let command_line = self.describe(&args);
        debug!("running interactively: {}", command_line);

        let status = self
            .command(&args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| spawn_error(e, &command_line))?;

        if status.success() {
            Ok(())
        } else {
            Err(TmuxError::CommandFailed {
                command: command_line,
                stderr: format!("exited with {status}"),
            }
            .into())
        }
    }

    /// Type a command line into the active pane of a session and press Enter
    pub async fn send_keys(&self, session_name: &str, keys: &str) -> Result<()> {
        let target = format!("{}:", exact_target(session_name));
        for args in send_keys_steps(&target, keys) {
            self.execute(&args).await?;
        }
        Ok(())
    }
}

/// `-l` sends `keys` as text even when it spells a key name like `Space`
fn send_keys_steps<'a>(target: &'a str, keys: &'a str) -> [Vec<&'a str>; 2] {
    [
        vec!["send-keys", "-t", target, "-l", keys],
        vec!["send-keys", "-t", target, "Enter"],
    ]
}

fn os_args<'a>(args: &'a [&str]) -> Vec<&'a OsStr> {
    args.iter().map(OsStr::new).collect()
}

impl Default for TmuxExecutor {
    fn default() -> Self {
        Self::new(TmuxContext::from_env())
    }
}

#[async_trait]
impl Multiplexer for TmuxExecutor {
    async fn list_sessions(&self) -> Result<String> {
        self.execute(&["list-sessions", "-F", SESSION_FORMAT]).await
    }

    async fn current_session(&self) -> Result<Option<String>> {
        if !self.context.inside {
            debug!("TMUX not set, running outside any session");
            return Ok(None);
        }

        let mut args = vec!["display-message", "-p"];
        if let Some(pane) = &self.context.pane {
            args.extend(["-t", pane.as_str()]);
        }
        args.push(CURRENT_SESSION_FORMAT);

        let name = self.execute(&args).await?;
        let name = name.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    async fn switch_to(&self, session_name: &str) -> Result<()> {
        let target = exact_target(session_name);
        if self.context.inside {
            self.execute(&["switch-client", "-t", &target]).await?;
            Ok(())
        } else {
            self.execute_interactive(&["attach-session", "-t", &target])
                .await
        }
    }

    async fn has_session(&self, session_name: &str) -> Result<bool> {
        let target = exact_target(session_name);
        match self.execute(&["has-session", "-t", &target]).await {
            Ok(_) => Ok(true),
            // "has-session" returns non-zero if the session (or the server) doesn't exist
            Err(Error::Tmux(
                TmuxError::CommandFailed { .. }
                | TmuxError::ServerNotRunning
                | TmuxError::SessionNotFound(_),
            )) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn create_session(
        &self,
        session_name: &str,
        working_dir: &Path,
        layout: &SessionLayout,
    ) -> Result<()> {
        let working_dir = working_dir.as_os_str();
        let window = format!("{}:", exact_target(session_name));

        self.execute_os(&[
            OsStr::new("new-session"),
            OsStr::new("-d"),
            OsStr::new("-s"),
            OsStr::new(session_name),
            OsStr::new("-c"),
            working_dir,
            OsStr::new("-x"),
            OsStr::new(DETACHED_WIDTH),
            OsStr::new("-y"),
            OsStr::new(DETACHED_HEIGHT),
        ])
        .await?;

        // Each split leaves the new pane active, so commands land in creation order
        for pane in 0..layout.pane_count() {
            if pane > 0 {
                self.execute_os(&[
                    OsStr::new("split-window"),
                    OsStr::new("-t"),
                    OsStr::new(&window),
                    OsStr::new("-c"),
                    working_dir,
                ])
                .await?;
            }
            if let Some(cmd) = layout.command_for(pane) {
                self.send_keys(session_name, cmd).await?;
            }
        }

        if layout.pane_count() > 1 {
            self.execute(&["select-layout", "-t", &window, "tiled"])
                .await?;
        }

        Ok(())
    }

    async fn list_windows(&self, session_name: &str) -> Result<String> {
        let target = exact_target(session_name);
        self.execute(&["list-windows", "-t", &target, "-F", WINDOW_FORMAT])
            .await
    }

    async fn list_panes(&self, session_name: &str) -> Result<String> {
        let target = exact_target(session_name);
        self.execute(&["list-panes", "-s", "-t", &target, "-F", PANE_FORMAT])
            .await
    }
}

fn spawn_error(e: std::io::Error, command_line: &str) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
        TmuxError::NotInstalled.into()
    } else {
        warn!("failed to spawn {}: {}", command_line, e);
        TmuxError::CommandFailed {
            command: command_line.to_string(),
            stderr: e.to_string(),
        }
        .into()
    }
}

/// Map tmux's stderr onto a specific error where it is recognisable
fn classify_failure(command: String, stderr: String) -> TmuxError {
    if stderr.contains("no server running") || stderr.contains("error connecting to") {
        TmuxError::ServerNotRunning
    } else if let Some(rest) = stderr.strip_prefix("can't find session: ") {
        TmuxError::SessionNotFound(rest.trim_start_matches('=').to_string())
    } else {
        TmuxError::CommandFailed { command, stderr }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_creation() {
        let executor = TmuxExecutor::new(TmuxContext::outside());
        assert_eq!(executor.program, DEFAULT_TMUX_PROGRAM);
        assert!(executor.socket_name.is_none());
        assert!(!executor.context.inside);
    }

    #[test]
    fn test_send_keys_types_literally_then_enter() {
        let [text, enter] = send_keys_steps("=docs:", "Space");
        assert_eq!(text, vec!["send-keys", "-t", "=docs:", "-l", "Space"]);
        assert_eq!(enter, vec!["send-keys", "-t", "=docs:", "Enter"]);
    }

    #[test]
    fn test_describe_includes_socket() {
        let executor = TmuxExecutor::new(TmuxContext::outside())
            .with_socket_name(Some("test-sock".to_string()));
        assert_eq!(
            executor.describe(&os_args(&["list-sessions"])),
            "tmux -L test-sock list-sessions"
        );
    }

    #[test]
    fn test_classify_failure() {
        let err = classify_failure(
            "tmux list-sessions".to_string(),
            "no server running on /tmp/tmux-1000/default".to_string(),
        );
        assert!(matches!(err, TmuxError::ServerNotRunning));

        let err = classify_failure(
            "tmux switch-client -t =docs".to_string(),
            "can't find session: =docs".to_string(),
        );
        assert!(matches!(err, TmuxError::SessionNotFound(name) if name == "docs"));

        let err = classify_failure("tmux foo".to_string(), "unknown command: foo".to_string());
        assert!(matches!(err, TmuxError::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn test_current_session_outside_tmux_skips_query() {
        // A bogus binary proves no subprocess is spawned
        let executor =
            TmuxExecutor::new(TmuxContext::outside()).with_program("/nonexistent/tmux-binary");
        assert_eq!(executor.current_session().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_binary_is_not_installed() {
        let executor =
            TmuxExecutor::new(TmuxContext::outside()).with_program("/nonexistent/tmux-binary");
        let err = executor.list_sessions().await.unwrap_err();
        assert!(matches!(err, Error::Tmux(TmuxError::NotInstalled)));
    }
}
