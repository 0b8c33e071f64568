//! Configuration module
//!
//! Handles:
//! - User configuration (`config.toml` in the platform config directory)
//! - Project roots file (`projects.conf`) for the directory picker

mod projects;
mod settings;

pub use projects::*;
pub use settings::*;
