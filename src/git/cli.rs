//! Diff and commit through the system `git` binary.
//!
//! Shelling out inherits the user's git config, hooks and signing setup,
//! which a library implementation would bypass.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::error::GitError;

/// Which changes to describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DiffScope {
    /// Changes in the index (`git diff --cached`).
    #[default]
    Staged,
    /// The most recent commit (`git diff HEAD~1 HEAD`).
    LastCommit,
}

impl DiffScope {
    fn git_args(self) -> &'static [&'static str] {
        match self {
            DiffScope::Staged => &["diff", "--cached", "--no-color", "--no-ext-diff"],
            DiffScope::LastCommit => &["diff", "--no-color", "--no-ext-diff", "HEAD~1", "HEAD"],
        }
    }

    /// What to tell the operator when this scope has no changes.
    pub fn empty_notice(self) -> &'static str {
        match self {
            DiffScope::Staged => "No staged files present. Stage changes with `git add` first.",
            DiffScope::LastCommit => "The last commit has no changes to describe.",
        }
    }
}

impl fmt::Display for DiffScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffScope::Staged => write!(f, "staged changes"),
            DiffScope::LastCommit => write!(f, "last commit"),
        }
    }
}

/// Text-in/text-out contract with the version-control tool.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
pub trait VersionControl {
    /// Return the diff text for `scope`. An empty string means no changes.
    fn diff(&self, scope: DiffScope) -> Result<String, GitError>;

    /// Create a commit with `message`, returning git's summary output.
    fn commit(&self, message: &str) -> Result<String, GitError>;
}

/// Runs `git` from a repository work tree.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Run a git command and return its stdout, or a descriptive error.
    ///
    /// Failure is decided by exit status; warnings git prints to stderr on
    /// success are ignored.
    fn run(&self, args: &[&str], operation: &str) -> Result<String, GitError> {
        debug!("Running git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(GitError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::CommandFailed {
                operation: operation.to_string(),
                stderr: detail,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VersionControl for GitCli {
    fn diff(&self, scope: DiffScope) -> Result<String, GitError> {
        let diff = self.run(scope.git_args(), "diff")?;
        debug!("Collected {} bytes of diff for {}", diff.len(), scope);
        Ok(diff)
    }

    fn commit(&self, message: &str) -> Result<String, GitError> {
        let output = self.run(&["commit", "-m", message], "commit")?;
        Ok(output.trim().to_string())
    }
}
