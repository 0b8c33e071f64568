//! Menu color theme
//!
//! Centralized colors for the menus. Color is only emitted when it is wanted:
//! `--color auto` turns it off for non-terminals and when `NO_COLOR` is set.

use std::fmt::Display;

use crossterm::style::{Color, Stylize};
use serde::{Deserialize, Serialize};

/// When to emit ANSI colors
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when writing to a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl ColorChoice {
    /// Resolve against whether the output stream is a terminal
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal && std::env::var_os("NO_COLOR").is_none(),
        }
    }
}

/// Theme configuration for the menus
#[derive(Debug, Clone)]
pub struct Theme {
    enabled: bool,

    pub header: Color,
    pub current: Color,
    pub attached: Color,
    pub detached: Color,
    pub index: Color,
    pub prompt: Color,
    pub error: Color,
    pub hint: Color,
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Theme {
    /// Basic 16-color theme; `enabled = false` renders plain text
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            header: Color::Cyan,
            current: Color::Green,
            attached: Color::Yellow,
            detached: Color::Reset,
            index: Color::Blue,
            prompt: Color::Reset,
            error: Color::Red,
            hint: Color::DarkGrey,
            success: Color::Green,
        }
    }

    /// Theme that never emits escape codes
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Color `text`, or return it unchanged when color is off
    pub fn paint(&self, text: impl Display, color: Color) -> String {
        let text = text.to_string();
        if !self.enabled || color == Color::Reset {
            return text;
        }
        text.with(color).to_string()
    }

    /// Bold and colored, for headers
    pub fn strong(&self, text: impl Display, color: Color) -> String {
        let text = text.to_string();
        if !self.enabled {
            return text;
        }
        text.with(color).bold().to_string()
    }
}
