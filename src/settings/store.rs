//! Key=value settings file with upsert semantics.
//!
//! The file holds one `key=value` pair per line. Lines that are blank,
//! comments (`#`) or otherwise unparseable are carried through untouched.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::SettingsError;

const APP_DIR: &str = "gitscribe";
const SETTINGS_FILE_NAME: &str = "settings";

/// Default settings location: `<config dir>/gitscribe/settings`.
pub fn default_settings_path() -> Result<PathBuf, SettingsError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(SETTINGS_FILE_NAME))
        .ok_or(SettingsError::NoConfigDir)
}

/// A single settings file on disk.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value stored for `key`.
    ///
    /// Creates an empty file on first use. Returns `Ok(None)` when the key
    /// is absent.
    pub fn load(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let content = self.read_or_create()?;

        Ok(content.lines().find_map(|line| match parse_line(line) {
            Some((k, v)) if k == key => Some(v.to_string()),
            _ => None,
        }))
    }

    /// Replace the line for `key` in place, or append one, then rewrite the file.
    pub fn upsert(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        let content = self.read_or_create()?;
        let updated = upsert_content(&content, key, value);
        self.write(&updated)?;

        debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }

    fn read_or_create(&self) -> Result<String, SettingsError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Creating settings file {}", self.path.display());
                self.write("")?;
                Ok(String::new())
            }
            Err(source) => Err(SettingsError::ReadFailed {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Full-file overwrite through a sibling temp file and rename.
    ///
    /// Temp files are created with mode 0600 on unix, which the persisted
    /// file keeps.
    fn write(&self, content: &str) -> Result<(), SettingsError> {
        let write_failed = |source: std::io::Error| SettingsError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(write_failed)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_failed)?;
        tmp.write_all(content.as_bytes()).map_err(write_failed)?;
        tmp.persist(&self.path).map_err(|e| write_failed(e.error))?;

        Ok(())
    }
}

/// Split a `key=value` line. Comments and lines without `=` yield `None`.
fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (key, value) = trimmed.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key, value.trim()))
}

/// Rewrite `content` so exactly one line holds `key`.
///
/// The first existing line for `key` is updated in place; any later
/// duplicates are dropped.
fn upsert_content(content: &str, key: &str, value: &str) -> String {
    let entry = format!("{key}={value}");
    let mut lines = Vec::new();
    let mut found = false;

    for line in content.lines() {
        match parse_line(line) {
            Some((k, _)) if k == key => {
                if !found {
                    lines.push(entry.clone());
                    found = true;
                }
            }
            _ => lines.push(line.to_string()),
        }
    }

    if !found {
        lines.push(entry);
    }

    let mut result = lines.join("\n");
    result.push('\n');
    result
}
