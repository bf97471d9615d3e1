//! Local key=value settings file.

pub mod store;

pub use store::{SettingsStore, default_settings_path};
