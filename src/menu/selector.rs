//! Interactive session selector
//!
//! One pass of `LISTED → SELECTED → SWITCHED`, `LISTED → QUIT`, or
//! `LISTED → INPUT_EXHAUSTED`. The only loop is the bounded re-prompt.

use std::io::{BufRead, Write};

use tracing::info;

use crate::error::Result;
use crate::menu::{render_menu, Prompt, Theme, DEFAULT_ATTEMPTS};
use crate::session::SessionSnapshot;
use crate::tmux::Multiplexer;

/// How a selector run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Switched to the named session
    Switched(String),
    /// User quit without acting
    Quit,
    /// No session other than the current one exists
    NothingToSwitch,
}

/// Renders the switch menu and acts on one choice
pub struct Selector<'a, M: Multiplexer + ?Sized> {
    mux: &'a M,
    theme: &'a Theme,
    max_attempts: usize,
}

impl<'a, M: Multiplexer + ?Sized> Selector<'a, M> {
    pub fn new(mux: &'a M, theme: &'a Theme) -> Self {
        Self {
            mux,
            theme,
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Show `snapshot`, read a choice from `input`, and switch if one was made
    pub async fn run<R: BufRead, W: Write>(
        &self,
        snapshot: &SessionSnapshot,
        input: &mut R,
        out: &mut W,
    ) -> Result<Outcome> {
        render_menu(out, self.theme, snapshot)?;

        let targets = snapshot.switch_targets();
        if targets.is_empty() {
            writeln!(out, "No other sessions to switch to.")?;
            return Ok(Outcome::NothingToSwitch);
        }

        let choice = Prompt::new("Switch to #", targets.len())
            .with_max_attempts(self.max_attempts)
            .read(input, out, self.theme)?;
        let Some(index) = choice else {
            return Ok(Outcome::Quit);
        };

        let name = targets[index].name.clone();
        info!("Switching to session {}", name);
        self.mux.switch_to(&name).await?;

        Ok(Outcome::Switched(name))
    }
}
