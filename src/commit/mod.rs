//! AI-generated commit messages: prompt construction and the size-guarded generator.

pub mod message;
pub mod prompt;

pub use message::{DEFAULT_TOKEN_LIMIT, MessageGenerator, clean_message, is_conventional};
pub use prompt::{build_commit_prompt, count_tokens, sanitize_diff};
