//! Fuzzy finder subprocess
//!
//! Candidates go in on stdin, one per line; the chosen line comes back on stdout.
//! A non-zero exit (no match, Esc, Ctrl-C) or empty output means "no selection".

use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{FinderError, Result};

/// An external fuzzy finder such as `fzf`
#[derive(Debug, Clone)]
pub struct FuzzyFinder {
    program: String,
    args: Vec<String>,
}

impl FuzzyFinder {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.finder_program, config.finder_args.clone())
    }

    /// Fail early with an install hint when the binary is missing
    pub fn ensure_installed(&self) -> Result<()> {
        which::which(&self.program)
            .map(|path| debug!("Using fuzzy finder at {:?}", path))
            .map_err(|_| FinderError::NotInstalled(self.program.clone()).into())
    }

    /// Let the user pick one of `candidates`
    #[instrument(skip(self, candidates), fields(program = %self.program, count = candidates.len()))]
    pub async fn pick(&self, candidates: &[String]) -> Result<Option<String>> {
        let command_line = format!("{} {}", self.program, self.args.join(" "));
        debug!("running: {}", command_line);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FinderError::NotInstalled(self.program.clone())
                } else {
                    FinderError::Failed {
                        command: command_line.clone(),
                        stderr: e.to_string(),
                    }
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            let input = candidates.join("\n") + "\n";
            // The finder may exit before reading everything
            match stdin.write_all(input.as_bytes()).await {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                    return Err(FinderError::Failed {
                        command: command_line,
                        stderr: e.to_string(),
                    }
                    .into());
                }
                _ => {}
            }
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            debug!("Finder exited with {}, no selection", output.status);
            return Ok(None);
        }

        let choice = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Finder returned {:?}", choice);
        Ok((!choice.is_empty()).then_some(choice))
    }
}
