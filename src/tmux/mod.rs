//! Tmux CLI integration
//!
//! Provides:
//! - `Multiplexer` - The operations the menus need, as a trait
//! - `TmuxExecutor` - The real implementation, shelling out to `tmux`
//! - `format` - `-F` format strings and line parsers

mod executor;
pub mod format;
mod multiplexer;

pub use executor::*;
pub use format::{CURRENT_SESSION_FORMAT, PANE_FORMAT, SESSION_FORMAT, WINDOW_FORMAT};
pub use multiplexer::*;
