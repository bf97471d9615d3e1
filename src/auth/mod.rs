//! Access token resolution.
//!
//! Lookup order:
//! 1. A token supplied up front (the `OPENAI_ACCESS_TOKEN` environment variable)
//! 2. The `OPENAI_ACCESS_TOKEN` line of the settings file
//! 3. A masked prompt, whose answer is written back to the settings file
//!
//! Tokens are never validated here. The endpoint reports a bad token on
//! first use, and the caller then asks for a refresh.

use tracing::debug;

use crate::error::AuthError;
use crate::settings::SettingsStore;
use crate::terminal::{Prompter, TokenRequest};

/// Settings file key holding the access token.
pub const TOKEN_KEY: &str = "OPENAI_ACCESS_TOKEN";

/// Environment variable that supplies a token without touching the settings file.
pub const TOKEN_ENV_VAR: &str = "OPENAI_ACCESS_TOKEN";

/// Resolves the bearer credential for one run.
pub struct Authenticator {
    settings: SettingsStore,
    preset: Option<String>,
}

impl Authenticator {
    pub fn new(settings: SettingsStore, preset: Option<String>) -> Self {
        Self {
            settings,
            preset: preset.filter(|t| !t.trim().is_empty()),
        }
    }

    /// Return a usable token.
    ///
    /// With `force_refresh` the stored token is skipped: the operator is asked
    /// for a new one, which replaces the stored value.
    pub fn authenticate<P: Prompter + ?Sized>(
        &self,
        prompter: &P,
        force_refresh: bool,
    ) -> Result<String, AuthError> {
        if !force_refresh {
            if let Some(token) = &self.preset {
                debug!("Using access token from {}", TOKEN_ENV_VAR);
                return Ok(token.clone());
            }

            if let Some(token) = self.settings.load(TOKEN_KEY)?.filter(|t| !t.is_empty()) {
                debug!("Using access token from {}", self.settings.path().display());
                return Ok(token);
            }
        }

        let request = if force_refresh {
            TokenRequest::Rejected
        } else {
            TokenRequest::Missing
        };
        let token = prompter.read_token(request)?;
        self.settings.upsert(TOKEN_KEY, &token)?;
        debug!("Saved new access token to {}", self.settings.path().display());

        Ok(token)
    }
}
