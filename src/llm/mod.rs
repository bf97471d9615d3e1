//! Chat completions client and shared retry logic.

pub mod client;
pub mod retry;

pub use client::{ChatClient, DEFAULT_ENDPOINT, DEFAULT_MODEL, OpenAiClient};
pub use retry::{RetryPolicy, retry_with_backoff};
