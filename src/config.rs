//! Resolved settings for one run.

use std::fmt;
use std::path::PathBuf;

use crate::auth::Authenticator;
use crate::commit::DEFAULT_TOKEN_LIMIT;
use crate::git::DiffScope;
use crate::llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::settings::SettingsStore;

/// Everything a run needs, built once from CLI flags and environment.
#[derive(Clone)]
pub struct RunConfig {
    pub scope: DiffScope,
    pub skip_commit: bool,
    pub token_limit: usize,
    pub endpoint: String,
    pub model: String,
    pub settings_path: PathBuf,
    /// Token supplied through the environment, if any.
    pub access_token: Option<String>,
}

impl RunConfig {
    /// Defaults for everything except the settings file location.
    pub fn new(settings_path: impl Into<PathBuf>) -> Self {
        Self {
            scope: DiffScope::default(),
            skip_commit: false,
            token_limit: DEFAULT_TOKEN_LIMIT,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            settings_path: settings_path.into(),
            access_token: None,
        }
    }

    pub fn authenticator(&self) -> Authenticator {
        Authenticator::new(
            SettingsStore::new(&self.settings_path),
            self.access_token.clone(),
        )
    }
}

impl fmt::Debug for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfig")
            .field("scope", &self.scope)
            .field("skip_commit", &self.skip_commit)
            .field("token_limit", &self.token_limit)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("settings_path", &self.settings_path)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}
