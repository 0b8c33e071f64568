//! Line-oriented terminal menus
//!
//! - `theme` - Colors, disabled for non-terminals
//! - `render` - Session menu, listings and detail views
//! - `prompt` - Numbered choice with a bounded retry budget
//! - `selector` - The interactive session switcher

mod prompt;
mod render;
mod selector;
mod theme;

pub use prompt::*;
pub use render::*;
pub use selector::*;
pub use theme::*;
