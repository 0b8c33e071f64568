//! Error types for tmux-switcher
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `Display` and `Error` impls.
//! Every variant that stems from the environment carries a remediation hint that the
//! binary prints under the one-line error message.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for tmux-switcher
#[derive(Error, Debug)]
pub enum Error {
    #[error("Tmux error: {0}")]
    Tmux(#[from] TmuxError),

    #[error("Fuzzy finder error: {0}")]
    Finder(#[from] FinderError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// A suggested fix for the user, if there is an obvious one
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Tmux(e) => e.hint(),
            Self::Finder(e) => e.hint(),
            Self::Input(InputError::Exhausted { .. }) => {
                Some("enter a number from the list, or 'q' to quit".to_string())
            }
            Self::Config(ConfigError::LoadFailed(_)) => {
                Some("check config.toml, or run `tmux-switcher config` to see its path".to_string())
            }
            _ => None,
        }
    }
}

/// Tmux integration errors
#[derive(Error, Debug)]
pub enum TmuxError {
    #[error("Tmux is not installed or not in PATH")]
    NotInstalled,

    #[error("Tmux server not running")]
    ServerNotRunning,

    #[error("Tmux command failed: {command} - {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Failed to parse tmux output: {0}")]
    ParseError(String),

    #[error("Session '{0}' not found in tmux")]
    SessionNotFound(String),
}

impl TmuxError {
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInstalled => Some("install tmux (e.g. `apt install tmux` or `brew install tmux`)".to_string()),
            Self::ServerNotRunning => Some("start a session first with `tmux new -s main`".to_string()),
            Self::SessionNotFound(_) => {
                Some("run `tmux-switcher list` to see the available sessions".to_string())
            }
            Self::ParseError(_) => Some("re-run with --verbose to see the raw tmux output".to_string()),
            Self::CommandFailed { .. } => None,
        }
    }
}

/// Fuzzy finder errors
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Fuzzy finder '{0}' is not installed or not in PATH")]
    NotInstalled(String),

    #[error("Fuzzy finder failed: {command} - {stderr}")]
    Failed { command: String, stderr: String },
}

impl FinderError {
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInstalled(program) => {
                Some(format!("install {program}, or pass --no-finder to pick from a numbered list"))
            }
            Self::Failed { .. } => None,
        }
    }
}

/// Interactive input errors
#[derive(Error, Debug)]
pub enum InputError {
    #[error("No valid selection after {attempts} attempt(s)")]
    Exhausted { attempts: usize },

    #[error("Failed to read from stdin: {0}")]
    Read(std::io::Error),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Failed to create config directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TmuxError::NotInstalled;
        assert!(err.to_string().contains("not installed"));

        let err = FinderError::NotInstalled("fzf".to_string());
        assert!(err.to_string().contains("fzf"));

        let err = InputError::Exhausted { attempts: 3 };
        assert!(err.to_string().contains("3 attempt"));

        let err = ConfigError::DirectoryCreationFailed(PathBuf::from("/tmp/foo"));
        assert!(err.to_string().contains("/tmp/foo"));
    }

    #[test]
    fn test_error_conversion() {
        let _top_err: Error = TmuxError::ServerNotRunning.into();
        let _top_err: Error = InputError::Exhausted { attempts: 1 }.into();
    }

    #[test]
    fn test_hints() {
        let err: Error = TmuxError::NotInstalled.into();
        assert!(err.hint().unwrap().contains("install tmux"));

        let err: Error = FinderError::NotInstalled("fzf".to_string()).into();
        assert!(err.hint().unwrap().contains("--no-finder"));

        let err: Error = TmuxError::CommandFailed {
            command: "tmux switch-client".to_string(),
            stderr: "no client".to_string(),
        }
        .into();
        assert!(err.hint().is_none());
    }
}
