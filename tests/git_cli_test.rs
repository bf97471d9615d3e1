//! Integration tests for diff and commit through the git binary.

mod common;

use gitscribe::error::GitError;
use gitscribe::git::{DiffScope, GitCli, VersionControl, open_repository};

use common::TestRepo;

#[test]
fn test_staged_diff_is_empty_without_staged_changes() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "hello\n", "chore: initial commit");
    repo.write_file("README.md", "hello\nunstaged edit\n");

    let git = GitCli::new(repo.path());
    let diff = git.diff(DiffScope::Staged).expect("diff should succeed");
    assert!(diff.trim().is_empty(), "Unstaged edits must not appear: {}", diff);
}

#[test]
fn test_staged_diff_contains_staged_lines() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "hello\n", "chore: initial commit");
    repo.stage_file("src/lib.rs", "pub fn answer() -> u32 { 42 }\n");

    let git = GitCli::new(repo.path());
    let diff = git.diff(DiffScope::Staged).expect("diff should succeed");

    assert!(diff.contains("src/lib.rs"));
    assert!(diff.contains("+pub fn answer() -> u32 { 42 }"));
    assert!(!diff.contains("\x1b["), "Diff must not carry color codes");
}

#[test]
fn test_staged_diff_in_repo_without_commits() {
    let repo = TestRepo::new();
    repo.stage_file("first.txt", "first\n");

    let git = GitCli::new(repo.path());
    let diff = git.diff(DiffScope::Staged).expect("diff should succeed");
    assert!(diff.contains("+first"));
}

#[test]
fn test_commit_creates_commit_with_message() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "hello\n", "chore: initial commit");
    repo.stage_file("README.md", "hello\nworld\n");

    let git = GitCli::new(repo.path());
    let summary = git.commit("feat: greet the world").expect("commit should succeed");

    assert!(summary.contains("feat: greet the world"));
    assert_eq!(repo.head_message().as_deref(), Some("feat: greet the world"));
    assert_eq!(repo.commit_count(), 2);
}

#[test]
fn test_commit_with_nothing_staged_fails() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "hello\n", "chore: initial commit");

    let git = GitCli::new(repo.path());
    match git.commit("fix: nothing") {
        Err(GitError::CommandFailed { operation, stderr }) => {
            assert_eq!(operation, "commit");
            assert!(!stderr.is_empty());
        }
        other => panic!("Expected CommandFailed, got: {:?}", other),
    }
    assert_eq!(repo.commit_count(), 1);
}

#[test]
fn test_last_commit_diff() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "hello\n", "chore: initial commit");
    repo.commit_file("README.md", "hello\nagain\n", "feat: say hello again");

    let git = GitCli::new(repo.path());
    let diff = git.diff(DiffScope::LastCommit).expect("diff should succeed");
    assert!(diff.contains("+again"));
}

#[test]
fn test_last_commit_diff_fails_with_single_commit() {
    let repo = TestRepo::new();
    repo.commit_file("README.md", "hello\n", "chore: initial commit");

    let git = GitCli::new(repo.path());
    let result = git.diff(DiffScope::LastCommit);
    assert!(
        matches!(result, Err(GitError::CommandFailed { .. })),
        "Expected CommandFailed, got: {:?}",
        result
    );
}

#[test]
fn test_open_repository_returns_workdir_for_subdirectory() {
    let repo = TestRepo::new();
    repo.write_file("nested/deep/file.txt", "x\n");

    let workdir = open_repository(&repo.path().join("nested/deep")).expect("should discover");
    assert_eq!(
        workdir.canonicalize().unwrap(),
        repo.path().canonicalize().unwrap()
    );
}
