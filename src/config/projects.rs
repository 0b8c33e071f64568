//! Project roots file
//!
//! A plain text file with one directory path or glob per line. `#` starts a comment
//! line, blank lines are ignored and a leading `~` expands to the home directory.
//! Only entries resolving to existing directories are offered to the picker.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use glob::MatchOptions;
use tracing::{debug, warn};

use crate::error::{ConfigError, Result};

/// Template written by `config --init`
pub const PROJECTS_TEMPLATE: &str = "\
# Project roots for `tmux-switcher open`
# One directory or glob per line; `~` expands to your home directory.
# ~/projects/*
# ~/work/*
";

/// Parsed contents of the project roots file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectRoots {
    /// Patterns in file order, with `~` already expanded
    pub patterns: Vec<String>,
}

impl ProjectRoots {
    /// Read the roots file; a missing file yields no patterns
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No project roots file at {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::LoadFailed(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Ok(Self::parse(&content, home_dir().as_deref()))
    }

    /// Parse file contents, expanding `~` against `home`
    pub fn parse(content: &str, home: Option<&Path>) -> Self {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| expand_tilde(line, home))
            .collect();

        Self { patterns }
    }

    /// Expand every pattern and keep the existing directories, sorted and de-duplicated
    pub fn directories(&self) -> Vec<PathBuf> {
        // Wildcards never match dot-directories
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        let mut found = BTreeSet::new();
        for pattern in &self.patterns {
            let paths = match glob::glob_with(pattern, options) {
                Ok(paths) => paths,
                Err(e) => {
                    warn!("Skipping invalid project pattern {:?}: {}", pattern, e);
                    continue;
                }
            };

            for entry in paths {
                match entry {
                    Ok(path) if path.is_dir() => {
                        found.insert(path);
                    }
                    Ok(path) => debug!("Ignoring non-directory {:?}", path),
                    Err(e) => warn!("Unreadable path while expanding {:?}: {}", pattern, e),
                }
            }
        }

        found.into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Expand a leading `~` or `~/`
fn expand_tilde(line: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return line.to_string();
    };

    if line == "~" {
        home.to_string_lossy().into_owned()
    } else if let Some(rest) = line.strip_prefix("~/") {
        home.join(rest).to_string_lossy().into_owned()
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let roots = ProjectRoots::parse(
            "# roots\n\n  ~/projects/*  \n/srv/work\n   # indented comment\n",
            Some(Path::new("/home/me")),
        );
        assert_eq!(
            roots.patterns,
            vec!["/home/me/projects/*".to_string(), "/srv/work".to_string()]
        );
    }

    #[test]
    fn test_expand_tilde() {
        let home = Some(Path::new("/home/me"));
        assert_eq!(expand_tilde("~", home), "/home/me");
        assert_eq!(expand_tilde("~/a", home), "/home/me/a");
        assert_eq!(expand_tilde("~other/a", home), "~other/a");
        assert_eq!(expand_tilde("~/a", None), "~/a");
    }

    #[test]
    fn test_directories_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        std::fs::create_dir(root.join("beta")).unwrap();
        std::fs::create_dir(root.join("alpha")).unwrap();
        std::fs::create_dir(root.join(".hidden")).unwrap();
        std::fs::write(root.join("notes.txt"), "x").unwrap();

        let content = format!(
            "{}/*\n{}/alpha\n{}/missing\n",
            root.display(),
            root.display(),
            root.display()
        );
        let roots = ProjectRoots::parse(&content, None);

        assert_eq!(
            roots.directories(),
            vec![root.join("alpha"), root.join("beta")]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let roots = ProjectRoots::load(&temp.path().join("projects.conf")).unwrap();
        assert!(roots.is_empty());
        assert!(roots.directories().is_empty());
    }

    #[test]
    fn test_template_has_no_active_entries() {
        assert!(ProjectRoots::parse(PROJECTS_TEMPLATE, None).is_empty());
    }
}
