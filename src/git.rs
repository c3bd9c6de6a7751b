use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};

/// Abstraction over `git` CLI execution for testability.
pub trait GitClient {
    fn run(&self, args: &[&str]) -> Result<String>;
}

/// Real `git` CLI client, optionally pinned to a working directory.
pub struct DefaultGitClient {
    working_dir: Option<PathBuf>,
}

impl DefaultGitClient {
    pub fn new() -> Self {
        Self { working_dir: None }
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self {
            working_dir: Some(dir),
        }
    }
}

impl Default for DefaultGitClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitClient for DefaultGitClient {
    fn run(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("git");
        cmd.args(args);
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .map_err(|e| Error::Git(format!("failed to run git: {e}")))?;

        if output.status.success() {
            String::from_utf8(output.stdout)
                .map_err(|e| Error::Git(format!("invalid utf8 from git: {e}")))
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(Error::Git(format!(
                "git {} failed: {stderr}",
                args.first().unwrap_or(&"")
            )))
        }
    }
}

/// The version-control collaborators the dispatcher needs: the repository
/// root, the set of files touched by the current patch, and per-file diffs.
pub struct GitRepo {
    client: Box<dyn GitClient>,
}

impl GitRepo {
    pub fn new() -> Self {
        Self {
            client: Box::new(DefaultGitClient::new()),
        }
    }

    pub fn in_dir(dir: PathBuf) -> Self {
        Self {
            client: Box::new(DefaultGitClient::in_dir(dir)),
        }
    }

    pub fn with_client(client: Box<dyn GitClient>) -> Self {
        Self { client }
    }

    /// Absolute path of the repository top-level directory.
    pub fn top_level(&self) -> Result<String> {
        let out = self.client.run(&["rev-parse", "--show-toplevel"])?;
        Ok(out.trim().to_string())
    }

    /// Files modified or added in the current patch, relative to the
    /// repository root. Union of unstaged and staged changes against HEAD.
    pub fn changed_files(&self) -> Result<HashSet<String>> {
        let mut files = HashSet::new();
        for args in [
            &["diff", "--name-only", "HEAD"][..],
            &["diff", "--name-only", "--cached", "HEAD"][..],
        ] {
            for line in self.client.run(args)?.lines() {
                if !line.is_empty() {
                    files.insert(line.to_string());
                }
            }
        }
        debug!(count = files.len(), "collected changed files");
        Ok(files)
    }

    /// Unified diff for one file, or `None` when the file has no diff in the
    /// current patch.
    pub fn diff_for(&self, path: &str) -> Result<Option<String>> {
        let out = self.client.run(&["diff", "HEAD", "--", path])?;
        if out.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(out))
        }
    }
}

impl Default for GitRepo {
    fn default() -> Self {
        Self::new()
    }
}
