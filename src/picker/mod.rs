//! Directory picker for opening project workspaces
//!
//! Offers the directories from the project roots file, lets the user choose one
//! (fuzzy finder or numbered fallback), then creates-or-attaches a session named
//! after the directory and switches to it.

mod finder;

pub use finder::*;

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::SessionLayout;
use crate::error::Result;
use crate::menu::{render_header, render_numbered, Prompt, Theme, DEFAULT_ATTEMPTS};
use crate::tmux::format::sanitize_session_name;
use crate::tmux::Multiplexer;

/// How an `open` run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Switched to `session`; `created` when it did not exist before
    Opened { session: String, created: bool },
    /// User made no selection
    Cancelled,
}

/// Session name for a project directory: its base name, made tmux-safe
pub fn session_name_for(dir: &Path) -> Option<String> {
    dir.file_name()
        .map(|name| sanitize_session_name(&name.to_string_lossy()))
        .filter(|name| !name.is_empty())
}

/// Opens project directories as tmux sessions
pub struct ProjectOpener<'a, M: Multiplexer + ?Sized> {
    mux: &'a M,
    theme: &'a Theme,
    layout: SessionLayout,
    max_attempts: usize,
}

impl<'a, M: Multiplexer + ?Sized> ProjectOpener<'a, M> {
    pub fn new(mux: &'a M, theme: &'a Theme) -> Self {
        Self {
            mux,
            theme,
            layout: SessionLayout::default(),
            max_attempts: DEFAULT_ATTEMPTS,
        }
    }

    pub fn with_layout(mut self, layout: SessionLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Pick a directory with the fuzzy finder
    pub async fn choose_with_finder(
        &self,
        finder: &FuzzyFinder,
        dirs: &[PathBuf],
    ) -> Result<Option<PathBuf>> {
        let candidates: Vec<String> = dirs.iter().map(|d| d.to_string_lossy().into_owned()).collect();
        let Some(choice) = finder.pick(&candidates).await? else {
            return Ok(None);
        };

        // Map back to the real path so non-UTF-8 names survive the round trip
        let dir = candidates
            .iter()
            .position(|c| *c == choice)
            .map(|i| dirs[i].clone())
            .unwrap_or_else(|| PathBuf::from(choice));
        Ok(Some(dir))
    }

    /// Pick a directory from a numbered list
    pub fn choose_from_menu<R: BufRead, W: Write>(
        &self,
        dirs: &[PathBuf],
        input: &mut R,
        out: &mut W,
    ) -> Result<Option<PathBuf>> {
        render_header(out, self.theme, "OPEN PROJECT")?;
        let labels: Vec<_> = dirs.iter().map(|d| d.display()).collect();
        render_numbered(out, self.theme, &labels)?;

        let choice = Prompt::new("Directory #", dirs.len())
            .with_max_attempts(self.max_attempts)
            .read(input, out, self.theme)?;
        Ok(choice.map(|index| dirs[index].clone()))
    }

    /// Switch to the session for `dir`, creating it first if needed
    pub async fn open(&self, dir: &Path) -> Result<OpenOutcome> {
        let Some(session) = session_name_for(dir) else {
            info!("No usable session name for {:?}", dir);
            return Ok(OpenOutcome::Cancelled);
        };

        let created = if self.mux.has_session(&session).await? {
            info!("Session {} already exists, switching", session);
            false
        } else {
            info!("Creating session {} in {:?}", session, dir);
            self.mux.create_session(&session, dir, &self.layout).await?;
            true
        };

        self.mux.switch_to(&session).await?;
        Ok(OpenOutcome::Opened { session, created })
    }

    /// Create a detached session for every directory that has none yet
    ///
    /// Returns the names of the sessions created, in directory order.
    pub async fn start_missing(&self, dirs: &[PathBuf]) -> Result<Vec<String>> {
        let mut created = Vec::new();
        for dir in dirs {
            let Some(session) = session_name_for(dir) else {
                continue;
            };
            if created.contains(&session) || self.mux.has_session(&session).await? {
                debug!("Skipping {:?}, session {} exists", dir, session);
                continue;
            }

            info!("Starting session {} in {:?}", session, dir);
            self.mux.create_session(&session, dir, &self.layout).await?;
            created.push(session);
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_name_for() {
        assert_eq!(
            session_name_for(Path::new("/home/me/projects/web.app")).as_deref(),
            Some("web_app")
        );
        assert_eq!(
            session_name_for(Path::new("/srv/api/")).as_deref(),
            Some("api")
        );
        assert_eq!(session_name_for(Path::new("/")), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_finder_choice_keeps_non_utf8_path() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        use crate::tmux::Multiplexer;

        struct NoTmux;

        #[async_trait::async_trait]
        impl Multiplexer for NoTmux {
            async fn list_sessions(&self) -> Result<String> {
                Ok(String::new())
            }
            async fn current_session(&self) -> Result<Option<String>> {
                Ok(None)
            }
            async fn switch_to(&self, _: &str) -> Result<()> {
                Ok(())
            }
            async fn has_session(&self, _: &str) -> Result<bool> {
                Ok(false)
            }
            async fn create_session(&self, _: &str, _: &Path, _: &SessionLayout) -> Result<()> {
                Ok(())
            }
            async fn list_windows(&self, _: &str) -> Result<String> {
                Ok(String::new())
            }
            async fn list_panes(&self, _: &str) -> Result<String> {
                Ok(String::new())
            }
        }

        let odd = PathBuf::from(OsStr::from_bytes(b"/srv/proj-\xff"));
        let dirs = vec![odd.clone(), PathBuf::from("/srv/plain")];
        let theme = Theme::plain();
        let opener = ProjectOpener::new(&NoTmux, &theme);
        let finder = FuzzyFinder::new("head", vec!["-n".to_string(), "1".to_string()]);

        let choice = opener.choose_with_finder(&finder, &dirs).await.unwrap();
        assert_eq!(choice, Some(odd));
    }
}
