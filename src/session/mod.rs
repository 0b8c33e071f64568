//! Session model and queries
//!
//! - `types` - Immutable records parsed from tmux output
//! - `lister` - `list_sessions`, the snapshot every command starts from
//! - `inspect` - Window/pane detail for a single session

mod inspect;
mod lister;
mod types;

pub use inspect::*;
pub use lister::*;
pub use types::*;
