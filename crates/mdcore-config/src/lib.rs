use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

pub const APP_DIR_NAME: &str = "MarkdownTray";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const DEFAULT_FILENAMES: &str = "README.md\nNOTES.md\nTODO.md";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub directory: String,
    pub filenames: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Theme {
    Dark,
    #[default]
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Anything other than "Dark" is treated as the light theme.
impl<'de> Deserialize<'de> for Theme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(match value.as_deref() {
            Some("Dark") => Theme::Dark,
            _ => Theme::Light,
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            directory: String::new(),
            filenames: DEFAULT_FILENAMES.to_string(),
        }
    }
}

impl Settings {
    /// Filename patterns in entry order, trimmed, blanks removed.
    pub fn patterns(&self) -> Vec<String> {
        split_patterns(&self.filenames)
    }
}

pub fn split_patterns(filenames: &str) -> Vec<String> {
    filenames
        .split(['\r', '\n'])
        .map(str::trim)
        .filter(|pattern| !pattern.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn app_data_dir() -> PathBuf {
    let base = env::var("LOCALAPPDATA").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(base).join(APP_DIR_NAME)
}

pub fn settings_path() -> PathBuf {
    app_data_dir().join(SETTINGS_FILE_NAME)
}

pub fn load_from(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_or_default(path: &Path) -> Settings {
    match load_from(path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::debug!("using default settings: {}", err);
            Settings::default()
        }
    }
}

pub fn save_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let json = serde_json::to_string_pretty(settings).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    std::fs::write(path, json).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("settings saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_list_the_usual_note_files() {
        let settings = Settings::default();
        assert_eq!(settings.theme, Theme::Light);
        assert!(settings.directory.is_empty());
        assert_eq!(settings.patterns(), vec!["README.md", "NOTES.md", "TODO.md"]);
    }

    #[test]
    fn patterns_split_on_any_line_break_and_trim() {
        let patterns = split_patterns("  *.md \r\n\r\nTODO.txt\n   \nnotes?.md");
        assert_eq!(patterns, vec!["*.md", "TODO.txt", "notes?.md"]);
    }

    #[test]
    fn json_uses_pascal_case_keys() {
        let settings = Settings {
            theme: Theme::Dark,
            directory: "C:\\notes".to_string(),
            filenames: "TODO.md".to_string(),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(
            json,
            r#"{"Theme":"Dark","Directory":"C:\\notes","Filenames":"TODO.md"}"#
        );
    }

    #[test]
    fn unknown_or_null_theme_loads_as_light() {
        let settings: Settings =
            serde_json::from_str(r#"{"Theme":"Solarized","Directory":"x"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.directory, "x");

        let settings: Settings = serde_json::from_str(r#"{"Theme":null}"#).unwrap();
        assert_eq!(settings.theme, Theme::Light);
    }

    #[test]
    fn missing_filenames_fall_back_to_default_list() {
        let settings: Settings = serde_json::from_str(r#"{"Theme":"Dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.filenames, DEFAULT_FILENAMES);
    }

    #[test]
    fn save_then_load_restores_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE_NAME);
        let settings = Settings {
            theme: Theme::Dark,
            directory: "/tmp/notes".to_string(),
            filenames: "*.md\nTODO.txt".to_string(),
        };

        save_to(&path, &settings).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains('\n'), "settings should be written indented");
        assert_eq!(load_from(&path).unwrap(), settings);
    }

    #[test]
    fn load_or_default_swallows_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert_eq!(load_or_default(&missing), Settings::default());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(load_from(&broken), Err(ConfigError::Json { .. })));
        assert_eq!(load_or_default(&broken), Settings::default());
    }
}
