//! Repository discovery and git availability checks.

use std::path::{Path, PathBuf};

use git2::Repository;

use crate::error::GitError;

/// Check that the git binary is on PATH.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| GitError::NotInstalled)
}

/// Find the repository containing `start` and return its work tree root.
pub fn open_repository(start: &Path) -> Result<PathBuf, GitError> {
    let repo = Repository::discover(start).map_err(GitError::NotARepository)?;

    repo.workdir()
        .map(Path::to_path_buf)
        .ok_or(GitError::BareRepository)
}
