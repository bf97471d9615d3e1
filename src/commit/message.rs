//! Commit message generation with a local size guard.

use std::sync::LazyLock;

use regex_lite::Regex;
use tracing::{debug, warn};

use crate::commit::prompt::{build_commit_prompt, count_tokens};
use crate::error::GeneratorError;
use crate::llm::client::ChatClient;
use crate::llm::retry::{RetryPolicy, retry_with_backoff};

/// Default whitespace-token ceiling for a diff.
pub const DEFAULT_TOKEN_LIMIT: usize = 2048;

static CONVENTIONAL_SUBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(feat|fix|chore)(\([^)]+\))?!?: \S").expect("subject pattern is valid")
});

static LEADING_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(suggested\s+)?(commit\s+)?message\s*:\s*").expect("label pattern is valid")
});

/// Turns a diff into a one-line commit message through a [`ChatClient`].
pub struct MessageGenerator<C> {
    client: C,
    token_limit: usize,
}

impl<C: ChatClient> MessageGenerator<C> {
    pub fn new(client: C, token_limit: usize) -> Self {
        Self {
            client,
            token_limit,
        }
    }

    /// Reject diffs whose token count meets or exceeds the ceiling.
    ///
    /// Returns the token count when the diff may be sent.
    pub fn check_size(&self, diff: &str) -> Result<usize, GeneratorError> {
        let tokens = count_tokens(diff);
        if tokens >= self.token_limit {
            return Err(GeneratorError::DiffTooLarge {
                tokens,
                limit: self.token_limit,
            });
        }
        Ok(tokens)
    }

    /// Generate a commit message for `diff`.
    ///
    /// Oversized diffs fail with [`GeneratorError::DiffTooLarge`] before any
    /// request is made. Transient endpoint failures are retried with backoff;
    /// authorization and size rejections are returned as-is.
    pub async fn generate(&self, diff: &str, token: &str) -> Result<String, GeneratorError> {
        let tokens = self.check_size(diff)?;
        let prompt = build_commit_prompt(diff);

        debug!(
            "Commit prompt: {} chars, diff: {} tokens (limit {})",
            prompt.len(),
            tokens,
            self.token_limit
        );

        let prompt = prompt.as_str();
        let raw = retry_with_backoff(
            RetryPolicy::default(),
            || self.client.complete(prompt, token),
            GeneratorError::is_transient,
            |e| GeneratorError::RetriesExhausted(Box::new(e)),
        )
        .await?;

        debug!("Raw response: {}", raw);

        let message = clean_message(&raw).ok_or(GeneratorError::EmptyResponse)?;
        if !is_conventional(&message) {
            warn!("Generated message does not follow `type: description`: {}", message);
        }

        Ok(message)
    }
}

/// Reduce an endpoint reply to a single commit subject line.
///
/// Takes the first line outside code fences that is still non-empty after
/// dropping a leading `Commit message:` label and surrounding quotes or
/// backticks. Returns `None` when no line qualifies.
pub fn clean_message(raw: &str) -> Option<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with("```"))
        .find_map(clean_line)
}

fn clean_line(line: &str) -> Option<String> {
    let unlabeled = LEADING_LABEL.replace(line, "");
    let cleaned = unlabeled
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Whether `message` matches `type(scope)?: description` with type feat, fix or chore.
pub fn is_conventional(message: &str) -> bool {
    CONVENTIONAL_SUBJECT.is_match(message)
}
