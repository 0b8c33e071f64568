//! User configuration settings
//!
//! Layered configuration: defaults → config file → environment variables (`TSW_*`)

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::menu::ColorChoice;

/// Prefix for environment overrides (`TSW_FINDER_PROGRAM=sk`, ...)
pub const ENV_PREFIX: &str = "TSW_";

/// Name of the project roots file inside the config directory
pub const PROJECTS_FILE_NAME: &str = "projects.conf";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tmux binary to invoke
    pub tmux_program: String,

    /// Tmux server socket name (`tmux -L`); unset means the default server
    pub socket_name: Option<String>,

    /// Fuzzy finder used by `open`
    pub finder_program: String,

    /// Extra arguments passed to the fuzzy finder
    pub finder_args: Vec<String>,

    /// Project roots file (defaults to `projects.conf` next to the config file)
    pub projects_file: Option<PathBuf>,

    /// How many times a menu prompt is shown before giving up
    pub prompt_attempts: usize,

    /// Pane layout for sessions created by `open`
    pub layout: LayoutKind,

    /// Commands typed into the panes of a new session, in pane order
    pub pane_commands: Vec<String>,

    /// When to use colored output
    pub color: ColorChoice,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path (if set, logs to file instead of stderr)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tmux_program: "tmux".to_string(),
            socket_name: None,
            finder_program: "fzf".to_string(),
            finder_args: vec![
                "--prompt".to_string(),
                "Project> ".to_string(),
                "--height".to_string(),
                "80%".to_string(),
                "--reverse".to_string(),
            ],
            projects_file: None,
            prompt_attempts: 3,
            layout: LayoutKind::Single,
            pane_commands: Vec::new(),
            color: ColorChoice::Auto,
            debug: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration layering `config_path` over the defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config: Config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Layer config file if it exists
            .merge(Toml::file(config_path))
            // Layer environment variables (TSW_FINDER_PROGRAM, etc.)
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.prompt_attempts == 0 {
            return Err(ConfigError::LoadFailed(
                "prompt_attempts must be at least 1".to_string(),
            )
            .into());
        }
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the project roots file path
    pub fn projects_file_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.projects_file {
            Ok(path.clone())
        } else {
            Ok(Self::project_dirs()?.config_dir().join(PROJECTS_FILE_NAME))
        }
    }

    /// Layout applied to sessions created by `open`
    pub fn session_layout(&self) -> SessionLayout {
        SessionLayout {
            kind: self.layout,
            commands: self.pane_commands.clone(),
        }
    }

    /// Save current configuration to `config_path`
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(config_path, toml)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "tmux-switcher", "tmux-switcher").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}

/// Pane arrangement for new sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// One pane
    #[default]
    Single,
    /// Four tiled panes
    Quad,
}

/// A layout plus the commands to start in it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionLayout {
    pub kind: LayoutKind,
    pub commands: Vec<String>,
}

impl SessionLayout {
    pub fn pane_count(&self) -> usize {
        match self.kind {
            LayoutKind::Single => 1,
            LayoutKind::Quad => 4,
        }
    }

    /// Command for the pane at `index`, skipping blanks
    pub fn command_for(&self, index: usize) -> Option<&str> {
        self.commands
            .get(index)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }
}
