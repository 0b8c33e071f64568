//! tmux-switcher - An interactive menu for tmux sessions
//!
//! Lists the sessions of the running tmux server, shows them as a numbered menu
//! and switches to the one picked. A secondary picker opens project directories
//! as sessions. Everything goes through the `tmux` CLI and its `-F` output
//! formats; nothing here ever kills a session.
//!
//! # Modules
//!
//! - [`session`] - Session records, listing and inspection
//! - [`tmux`] - The `Multiplexer` seam and the `tmux` executor
//! - [`menu`] - Rendering, prompting and the interactive selector
//! - [`picker`] - Project directory picker and fuzzy finder
//! - [`config`] - Configuration and the project roots file
//! - [`error`] - Error types

pub mod config;
pub mod error;
pub mod menu;
pub mod picker;
pub mod session;
pub mod tmux;

pub use config::Config;
pub use error::{Error, Result};
pub use session::{SessionRecord, SessionSnapshot, SessionStatus};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
