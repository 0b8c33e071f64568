//! Integration tests for tmux-switcher
//!
//! These tests require tmux to be installed and available. Each test talks to
//! its own server socket (`tmux -L`) so the user's sessions are never touched.

use std::path::Path;

use tempfile::TempDir;

use tmux_switcher::config::{LayoutKind, SessionLayout};
use tmux_switcher::error::{Error, TmuxError};
use tmux_switcher::session::{inspect_session, list_sessions};
use tmux_switcher::tmux::{Multiplexer, TmuxContext, TmuxExecutor};

/// Helper to check if tmux is available
async fn tmux_available() -> bool {
    tokio::process::Command::new("tmux")
        .arg("-V")
        .output()
        .await
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Executor bound to a private server, as if run from outside tmux
fn isolated_executor(socket: &str) -> TmuxExecutor {
    TmuxExecutor::new(TmuxContext::outside()).with_socket_name(Some(socket.to_string()))
}

/// Private server socket, killed when the test ends (pass or panic)
struct ServerGuard {
    socket: String,
}

impl ServerGuard {
    fn new(test: &str) -> Self {
        Self {
            socket: format!("tsw-test-{}-{}", test, std::process::id()),
        }
    }

    fn tmux(&self, args: &[&str]) -> String {
        let output = std::process::Command::new("tmux")
            .args(["-L", &self.socket])
            .args(args)
            .output()
            .unwrap();
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = std::process::Command::new("tmux")
            .args(["-L", &self.socket, "kill-server"])
            .output();
    }
}

#[tokio::test]
async fn test_list_without_server_fails() {
    if !tmux_available().await {
        eprintln!("Skipping test: tmux not available");
        return;
    }

    let server = ServerGuard::new("no-server");
    let tmux = isolated_executor(&server.socket);

    let err = list_sessions(&tmux).await.unwrap_err();
    assert!(
        matches!(err, Error::Tmux(TmuxError::ServerNotRunning)),
        "unexpected error: {err:?}"
    );
    assert!(!tmux.has_session("anything").await.unwrap());
}

#[tokio::test]
async fn test_create_list_and_inspect() {
    if !tmux_available().await {
        eprintln!("Skipping test: tmux not available");
        return;
    }

    let server = ServerGuard::new("create");
    let tmux = isolated_executor(&server.socket);
    let work_dir = TempDir::new().unwrap();

    tmux.create_session("alpha", work_dir.path(), &SessionLayout::default())
        .await
        .unwrap();
    tmux.create_session("beta", work_dir.path(), &SessionLayout::default())
        .await
        .unwrap();

    let snapshot = list_sessions(&tmux).await.unwrap();
    let names: Vec<_> = snapshot.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert!(snapshot.current.is_none());
    assert!(snapshot.records.iter().all(|r| !r.is_current && !r.attached));
    assert!(snapshot.records.iter().all(|r| r.windows == 1));

    assert!(tmux.has_session("alpha").await.unwrap());
    // Exact matching: a prefix is not a session
    assert!(!tmux.has_session("alp").await.unwrap());

    let details = inspect_session(&tmux, &snapshot.records[0]).await.unwrap();
    assert_eq!(details.windows.len(), 1);
    assert_eq!(details.summary.total_panes, 1);
}

#[tokio::test]
async fn test_quad_layout_creates_four_panes() {
    if !tmux_available().await {
        eprintln!("Skipping test: tmux not available");
        return;
    }

    let server = ServerGuard::new("quad");
    let tmux = isolated_executor(&server.socket);
    let work_dir = TempDir::new().unwrap();
    let layout = SessionLayout {
        kind: LayoutKind::Quad,
        commands: Vec::new(),
    };

    tmux.create_session("grid", work_dir.path(), &layout)
        .await
        .unwrap();

    let snapshot = list_sessions(&tmux).await.unwrap();
    let details = inspect_session(&tmux, &snapshot.records[0]).await.unwrap();
    assert_eq!(details.summary.total_panes, 4);
    assert_eq!(details.windows[0].panes.len(), 4);
}

#[tokio::test]
async fn test_pane_commands_are_typed_literally() {
    if !tmux_available().await {
        eprintln!("Skipping test: tmux not available");
        return;
    }

    let server = ServerGuard::new("literal");
    let tmux = isolated_executor(&server.socket);
    let work_dir = TempDir::new().unwrap();
    let layout = SessionLayout {
        kind: LayoutKind::Single,
        commands: vec!["BSpace".to_string()],
    };

    tmux.create_session("keys", work_dir.path(), &layout)
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(500)).await;

    // As a key name this would be a backspace and leave no trace
    let screen = server.tmux(&["capture-pane", "-p", "-t", "=keys:"]);
    assert!(screen.contains("BSpace"), "pane shows: {screen:?}");
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_non_utf8_working_dir_is_kept() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    if !tmux_available().await {
        eprintln!("Skipping test: tmux not available");
        return;
    }

    let server = ServerGuard::new("non-utf8");
    let tmux = isolated_executor(&server.socket);
    let root = TempDir::new().unwrap();
    let project = root.path().join(OsStr::from_bytes(b"proj-\xff"));
    std::fs::create_dir(&project).unwrap();

    tmux.create_session("odd", &project, &SessionLayout::default())
        .await
        .unwrap();

    // A lossy fallback to "." would start the pane in this process's directory
    let cwd = server.tmux(&["display-message", "-p", "-t", "=odd:", "#{pane_current_path}"]);
    let here = std::env::current_dir().unwrap();
    assert!(!cwd.trim().is_empty());
    assert_ne!(cwd.trim(), here.to_string_lossy(), "pane started in {cwd:?}");
}

#[tokio::test]
async fn test_missing_binary_reports_not_installed() {
    let tmux = TmuxExecutor::new(TmuxContext::outside()).with_program("/nonexistent/tmux");
    let err = tmux
        .create_session("x", Path::new("/tmp"), &SessionLayout::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Tmux(TmuxError::NotInstalled)));
    assert!(err.hint().unwrap().contains("install tmux"));
}
