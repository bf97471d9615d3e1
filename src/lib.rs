//! gitscribe - A CLI tool that proposes commit messages for staged changes.
//!
//! # Overview
//!
//! gitscribe reads the staged diff, asks an OpenAI-compatible chat endpoint for a
//! one-line conventional commit message, and lets the operator accept, edit or
//! regenerate it before running `git commit`.

pub mod auth;
pub mod commit;
pub mod config;
pub mod error;
pub mod flow;
pub mod git;
pub mod llm;
pub mod settings;
pub mod terminal;

// Re-export commonly used types
pub use config::RunConfig;
pub use error::{AuthError, GeneratorError, GitError, PromptError, RunError, SettingsError};
pub use flow::{Completion, Session};
pub use git::DiffScope;
