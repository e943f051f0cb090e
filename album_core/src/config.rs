//! Persisted user settings.
//!
//! Stored as a flat JSON object using the camelCase keys users already know
//! from the settings screen. Keys missing from the file take their defaults.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_FOLDER: &str = "Albums";
pub const DEFAULT_FILE_NAME_FORMAT: &str = "{{title}}";

/// Names accepted by [`Settings::set`], in display order.
pub const KEYS: [&str; 5] = [
    "folder",
    "fileNameFormat",
    "templateFile",
    "spotifyClientId",
    "spotifyClientSecret",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub folder: String,
    pub file_name_format: String,
    pub template_file: String,
    pub spotify_client_id: String,
    pub spotify_client_secret: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            folder: DEFAULT_FOLDER.to_owned(),
            file_name_format: DEFAULT_FILE_NAME_FORMAT.to_owned(),
            template_file: String::new(),
            spotify_client_id: String::new(),
            spotify_client_secret: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

/// `<platform config dir>/album-notes/settings.json`
pub fn default_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("album-notes").join("settings.json"))
        .ok_or(ConfigError::NoConfigDir)
}

impl Settings {
    /// Reads settings from `path`. A missing file yields the defaults; so does
    /// a corrupt one, after a warning.
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Settings::default())
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_owned(),
                    source,
                })
            }
        };

        match serde_json::from_str(&content) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt settings file, using defaults");
                Ok(Settings::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_owned(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_err)
    }

    pub fn get(&self, key: &str) -> Result<&str, ConfigError> {
        let value = match key {
            "folder" => &self.folder,
            "fileNameFormat" => &self.file_name_format,
            "templateFile" => &self.template_file,
            "spotifyClientId" => &self.spotify_client_id,
            "spotifyClientSecret" => &self.spotify_client_secret,
            _ => return Err(ConfigError::UnknownKey(key.to_owned())),
        };
        Ok(value)
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), ConfigError> {
        let slot = match key {
            "folder" => &mut self.folder,
            "fileNameFormat" => &mut self.file_name_format,
            "templateFile" => &mut self.template_file,
            "spotifyClientId" => &mut self.spotify_client_id,
            "spotifyClientSecret" => &mut self.spotify_client_secret,
            _ => return Err(ConfigError::UnknownKey(key.to_owned())),
        };
        *slot = value.into();
        Ok(())
    }

    /// Both halves must be non-empty before any token request is attempted.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        if self.spotify_client_id.is_empty() || self.spotify_client_secret.is_empty() {
            return Err(ConfigError::MissingCredentials);
        }
        Ok(Credentials {
            client_id: self.spotify_client_id.clone(),
            client_secret: self.spotify_client_secret.clone(),
        })
    }

    /// The configured file name format, or the default when left blank.
    pub fn file_name_format(&self) -> &str {
        if self.file_name_format.is_empty() {
            DEFAULT_FILE_NAME_FORMAT
        } else {
            &self.file_name_format
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("settings.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.folder, "Albums");
        assert_eq!(settings.file_name_format, "{{title}}");
    }

    #[test]
    fn stored_keys_override_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"folder": "Music", "spotifyClientId": "id"}"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.folder, "Music");
        assert_eq!(settings.spotify_client_id, "id");
        assert_eq!(settings.file_name_format, "{{title}}");
        assert_eq!(settings.template_file, "");
    }

    #[test]
    fn corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let mut settings = Settings::default();
        settings.set("templateFile", "Templates/Album.md").unwrap();
        settings.save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains(r#""templateFile": "Templates/Album.md""#));
        assert_eq!(Settings::load(&path).unwrap(), settings);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut settings = Settings::default();
        assert!(matches!(
            settings.set("colour", "red"),
            Err(ConfigError::UnknownKey(key)) if key == "colour"
        ));
        assert!(settings.get("colour").is_err());
        for key in KEYS {
            assert!(settings.get(key).is_ok());
        }
    }

    #[test]
    fn credentials_require_both_halves() {
        let mut settings = Settings::default();
        assert!(matches!(settings.credentials(), Err(ConfigError::MissingCredentials)));
        settings.spotify_client_id = "id".into();
        assert!(matches!(settings.credentials(), Err(ConfigError::MissingCredentials)));
        settings.spotify_client_id.clear();
        settings.spotify_client_secret = "secret".into();
        assert!(matches!(settings.credentials(), Err(ConfigError::MissingCredentials)));
        settings.spotify_client_id = "id".into();
        assert_eq!(settings.credentials().unwrap().client_secret, "secret");
    }

    #[test]
    fn blank_format_falls_back() {
        let mut settings = Settings::default();
        settings.file_name_format.clear();
        assert_eq!(settings.file_name_format(), "{{title}}");
    }
}
