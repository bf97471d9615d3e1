//! Git operations: repository discovery via git2, diff and commit via the git binary.

pub mod cli;
pub mod repo;

pub use cli::{DiffScope, GitCli, VersionControl};
pub use repo::{check_git_installed, open_repository};
