//! Persisted user preferences.
//!
//! A single small JSON file (`~/.config/rental-terms/preferences.json` on
//! most platforms) holding the explicit theme choice. A missing file or a
//! missing key both mean "no preference".

use std::env;
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::theme::ThemeMode;

/// Overrides the preferences file location.
pub const PREFERENCES_PATH_ENV: &str = "RENTAL_TERMS_PREFERENCES";

pub const PREFERENCES_FILE_NAME: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("could not read {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not write {}: {source}", .path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("could not encode preferences: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferencesPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
}

impl PreferencesPayload {
    /// A malformed file is logged and read as empty.
    fn from_file(path: &Path) -> Result<Self, PreferencesError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(PreferencesError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Ok(serde_json::from_str(&text).unwrap_or_else(|error| {
            warn!(file = %path.display(), %error, "discarding unreadable theme preference");
            Self::default()
        }))
    }
}

#[derive(Debug, Default)]
pub struct Preferences {
    path: PathBuf,
    payload: PreferencesPayload,
    persist_to_disk: bool,
}

impl Preferences {
    /// Open the store at `path`, or at [`preferences_location`] when `None`.
    pub fn open(path: Option<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.unwrap_or_else(preferences_location);
        let payload = PreferencesPayload::from_file(&path)?;
        Ok(Self {
            path,
            payload,
            persist_to_disk: true,
        })
    }

    /// In-memory store for when the config directory is unusable.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            payload: PreferencesPayload::default(),
            persist_to_disk: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn theme(&self) -> Option<ThemeMode> {
        self.payload.theme
    }

    pub fn set_theme(&mut self, theme: ThemeMode) -> Result<(), PreferencesError> {
        self.payload.theme = Some(theme);
        if self.persist_to_disk {
            self.write()?;
        }
        Ok(())
    }

    fn write(&self) -> Result<(), PreferencesError> {
        let json = serde_json::to_string_pretty(&self.payload)?;
        let write_error = |source| PreferencesError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(write_error)?;
        }
        fs::write(&self.path, json).map_err(write_error)
    }
}

/// `$RENTAL_TERMS_PREFERENCES` when set, else `<config dir>/rental-terms/preferences.json`.
pub fn preferences_location() -> PathBuf {
    location_from(env::var_os(PREFERENCES_PATH_ENV))
}

fn location_from(overridden: Option<OsString>) -> PathBuf {
    overridden
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_default()
                .join("rental-terms")
                .join(PREFERENCES_FILE_NAME)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_means_no_preference() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = Preferences::open(Some(dir.path().join("absent.json"))).unwrap();
        assert_eq!(prefs.theme(), None);
    }

    #[test]
    fn theme_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(PREFERENCES_FILE_NAME);

        let mut prefs = Preferences::open(Some(path.clone())).unwrap();
        prefs.set_theme(ThemeMode::Dark).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"theme\": \"dark\""), "{written}");

        let reopened = Preferences::open(Some(path)).unwrap();
        assert_eq!(reopened.theme(), Some(ThemeMode::Dark));
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        let prefs = Preferences::open(Some(path)).unwrap();
        assert_eq!(prefs.theme(), None);
    }

    #[test]
    fn unknown_theme_value_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, r#"{"theme":"sepia"}"#).unwrap();
        let prefs = Preferences::open(Some(path)).unwrap();
        assert_eq!(prefs.theme(), None);
    }

    #[test]
    fn empty_object_means_no_preference() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFERENCES_FILE_NAME);
        fs::write(&path, "{}").unwrap();
        let prefs = Preferences::open(Some(path)).unwrap();
        assert_eq!(prefs.theme(), None);
    }

    #[test]
    fn location_honours_override() {
        let custom = location_from(Some(OsString::from("/tmp/terms.json")));
        assert_eq!(custom, PathBuf::from("/tmp/terms.json"));

        let fallback = location_from(Some(OsString::new()));
        assert!(fallback.ends_with(Path::new("rental-terms").join(PREFERENCES_FILE_NAME)));
    }

    #[test]
    fn write_failure_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join(PREFERENCES_FILE_NAME);

        let mut prefs = Preferences::open(Some(path.clone())).unwrap();
        let err = prefs.set_theme(ThemeMode::Dark).unwrap_err();
        assert!(matches!(err, PreferencesError::Write { .. }));
        assert!(err.to_string().contains(&path.display().to_string()), "{err}");
        assert_eq!(prefs.theme(), Some(ThemeMode::Dark));
    }

    #[test]
    fn ephemeral_store_never_touches_disk() {
        let mut prefs = Preferences::ephemeral();
        prefs.set_theme(ThemeMode::Light).unwrap();
        assert_eq!(prefs.theme(), Some(ThemeMode::Light));
        assert_eq!(prefs.path(), Path::new(""));
    }
}
