//! Error types for gitscribe modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

use crate::git::DiffScope;

/// Errors from the key=value settings file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Could not determine a configuration directory. Pass --settings-file explicitly.")]
    NoConfigDir,

    #[error("Failed to read settings file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write settings file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from invoking the git binary.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found. Install git and make sure it is on your PATH.")]
    NotInstalled,

    #[error("Not a git repository: {0}")]
    NotARepository(#[source] git2::Error),

    #[error("Bare repositories are not supported")]
    BareRepository,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git {operation} failed: {stderr}")]
    CommandFailed { operation: String, stderr: String },
}

/// Errors from the message generator and the chat endpoint.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Diff is too large to describe ({tokens} tokens, limit {limit})")]
    DiffTooLarge { tokens: usize, limit: usize },

    #[error("Endpoint rejected the request as too large: {0}")]
    PayloadTooLarge(String),

    #[error("Endpoint rejected the access token (HTTP {0})")]
    Unauthorized(u16),

    #[error("Endpoint returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Request to endpoint failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("Endpoint returned an unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Endpoint returned an empty commit message")]
    EmptyResponse,

    #[error("All retry attempts failed: {0}")]
    RetriesExhausted(#[source] Box<GeneratorError>),
}

impl GeneratorError {
    /// Whether another attempt of the same request may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GeneratorError::Http(_) => true,
            GeneratorError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Whether the payload was refused for its size, locally or remotely.
    pub fn is_too_large(&self) -> bool {
        matches!(
            self,
            GeneratorError::DiffTooLarge { .. } | GeneratorError::PayloadTooLarge(_)
        )
    }
}

/// Errors from interactive terminal prompts.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Interactive prompt failed: {0}")]
    Interaction(#[source] dialoguer::Error),
}

impl From<dialoguer::Error> for PromptError {
    fn from(err: dialoguer::Error) -> Self {
        PromptError::Interaction(err)
    }
}

/// Errors from obtaining the access token.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

/// Process exit codes, one per failure class.
pub mod exit_code {
    pub const NO_CHANGES: u8 = 3;
    pub const PAYLOAD_TOO_LARGE: u8 = 4;
    pub const AUTHORIZATION: u8 = 5;
    pub const EXTERNAL_TOOL: u8 = 6;
    pub const UNKNOWN_GENERATOR: u8 = 7;
    pub const SETTINGS: u8 = 8;
    pub const PROMPT: u8 = 9;
}

/// Terminal failures of a run, handled at the interaction loop boundary.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("{}", .0.empty_notice())]
    NoChanges(DiffScope),

    #[error("Changes too large to describe: {0}")]
    PayloadTooLarge(#[source] GeneratorError),

    #[error("Access token rejected after re-authentication: {0}")]
    Authorization(#[source] GeneratorError),

    #[error("{0}")]
    ExternalTool(#[source] GitError),

    #[error("Failed to generate commit message: {0}")]
    UnknownGenerator(#[source] GeneratorError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl RunError {
    /// Process exit code for this failure. Each taxonomy entry has its own code.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::NoChanges(_) => exit_code::NO_CHANGES,
            RunError::PayloadTooLarge(_) => exit_code::PAYLOAD_TOO_LARGE,
            RunError::Authorization(_) => exit_code::AUTHORIZATION,
            RunError::ExternalTool(_) => exit_code::EXTERNAL_TOOL,
            RunError::UnknownGenerator(_) => exit_code::UNKNOWN_GENERATOR,
            RunError::Settings(_) => exit_code::SETTINGS,
            RunError::Prompt(_) => exit_code::PROMPT,
        }
    }
}

impl From<AuthError> for RunError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Settings(e) => RunError::Settings(e),
            AuthError::Prompt(e) => RunError::Prompt(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            RunError::NoChanges(DiffScope::Staged).exit_code(),
            RunError::PayloadTooLarge(GeneratorError::DiffTooLarge { tokens: 5, limit: 4 })
                .exit_code(),
            RunError::Authorization(GeneratorError::Unauthorized(401)).exit_code(),
            RunError::ExternalTool(GitError::NotInstalled).exit_code(),
            RunError::UnknownGenerator(GeneratorError::EmptyResponse).exit_code(),
            RunError::Settings(SettingsError::NoConfigDir).exit_code(),
        ];

        for (i, a) in codes.iter().enumerate() {
            assert_ne!(*a, 0);
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(GeneratorError::Api { status: 503, body: String::new() }.is_transient());
        assert!(GeneratorError::Api { status: 429, body: String::new() }.is_transient());
        assert!(!GeneratorError::Api { status: 400, body: String::new() }.is_transient());
        assert!(!GeneratorError::Unauthorized(401).is_transient());
        assert!(!GeneratorError::PayloadTooLarge("413".into()).is_transient());
    }

    #[test]
    fn test_too_large_classification() {
        assert!(GeneratorError::DiffTooLarge { tokens: 10, limit: 5 }.is_too_large());
        assert!(GeneratorError::PayloadTooLarge("too big".into()).is_too_large());
        assert!(!GeneratorError::EmptyResponse.is_too_large());
    }

    #[test]
    fn test_no_changes_message_follows_scope() {
        assert!(
            RunError::NoChanges(DiffScope::Staged)
                .to_string()
                .contains("No staged files present")
        );

        let last = RunError::NoChanges(DiffScope::LastCommit).to_string();
        assert!(last.contains("last commit"));
        assert!(!last.contains("staged"));
    }
}
