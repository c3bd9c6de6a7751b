#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

use patchlint::error::{Error, Result};
use patchlint::git::GitClient;

pub fn run_git(dir: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} in {} failed: {}",
        args,
        dir.display(),
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Create a repo with one committed file so diffs against HEAD are possible.
pub fn setup_git_repo() -> tempfile::TempDir {
    let repo_dir = tempfile::TempDir::new().unwrap();
    run_git(repo_dir.path(), &["init"]);
    run_git(repo_dir.path(), &["config", "user.email", "test@test.com"]);
    run_git(repo_dir.path(), &["config", "user.name", "Test"]);
    std::fs::write(repo_dir.path().join("README.md"), "readme\n").unwrap();
    run_git(repo_dir.path(), &["add", "."]);
    run_git(repo_dir.path(), &["commit", "-m", "init"]);
    repo_dir
}

/// Scripted `git` collaborator: fixed root, changed-file list, and per-file
/// diff texts.
pub struct FakeGit {
    pub top_level: String,
    pub changed: Vec<String>,
    pub diffs: HashMap<String, String>,
}

impl FakeGit {
    pub fn new(top_level: &str) -> Self {
        Self {
            top_level: top_level.to_string(),
            changed: Vec::new(),
            diffs: HashMap::new(),
        }
    }

    pub fn changed(mut self, files: &[&str]) -> Self {
        self.changed = files.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn diff(mut self, file: &str, text: &str) -> Self {
        self.diffs.insert(file.to_string(), text.to_string());
        self
    }
}

impl GitClient for FakeGit {
    fn run(&self, args: &[&str]) -> Result<String> {
        match args {
            ["rev-parse", "--show-toplevel"] => Ok(format!("{}\n", self.top_level)),
            ["diff", "--name-only", "HEAD"] => Ok(self.changed.join("\n")),
            ["diff", "--name-only", "--cached", "HEAD"] => Ok(String::new()),
            ["diff", "HEAD", "--", path] => {
                Ok(self.diffs.get(*path).cloned().unwrap_or_default())
            }
            other => Err(Error::Git(format!("unexpected git args: {other:?}"))),
        }
    }
}

/// Checkstyle report with one file containing findings at lines 144 and 296.
pub const TWO_FINDINGS_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<checkstyle version="8.0">
  <file name="/repo/src/A.java">
    <error line="144" severity="error" message="Line is longer than 100 characters." source="checkstyle.LineLength"/>
    <error line="296" severity="error" message="Line has trailing spaces." source="checkstyle.TrailingSpaces"/>
  </file>
</checkstyle>
"#;

/// Diff for `src/A.java` with a single hunk spanning new lines 140..=148.
pub const A_JAVA_DIFF: &str = "\
diff --git a/src/A.java b/src/A.java
index 83db48f..bf269f4 100644
--- a/src/A.java
+++ b/src/A.java
@@ -140,5 +140,8 @@ public class A {
 context
-removed
+added one
+added two
+added three
 context
";

pub fn write_report(dir: &Path, xml: &str) -> std::path::PathBuf {
    let path = dir.join("checkstyle.xml");
    std::fs::write(&path, xml).unwrap();
    path
}
