//! User settings for costcalc
//!
//! Display currency, clipboard target and default log level. Settings are
//! read-only from the application's point of view; the user edits the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::ConfigPaths;
use crate::application::AppError;
use crate::domain::CurrencyFormat;
use crate::io::ClipboardSink;

/// Where copied export documents go
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardSettings {
    /// Program and arguments that receive the text on stdin,
    /// e.g. `["wl-copy"]` or `["xclip", "-selection", "clipboard"]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<Vec<String>>,

    /// File that receives the text when no command is configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl ClipboardSettings {
    /// A configured command wins over a file; with neither, text goes to stdout.
    pub fn sink(&self) -> ClipboardSink {
        if let Some(sink) = self
            .command
            .as_deref()
            .and_then(ClipboardSink::from_command_line)
        {
            return sink;
        }
        match &self.file {
            Some(path) => ClipboardSink::File(path.clone()),
            None => ClipboardSink::Stdout,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// How amounts are displayed
    #[serde(default)]
    pub currency: CurrencyFormat,

    #[serde(default)]
    pub clipboard: ClipboardSettings,

    /// Default tracing filter when neither RUST_LOG nor --verbose is given
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: CurrencyFormat::default(),
            clipboard: ClipboardSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from the resolved config directory, or defaults if there is no file
    pub fn load(paths: &ConfigPaths) -> Result<Self, AppError> {
        Self::load_from(&paths.settings_file())
    }

    /// Load settings from an explicit file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency, CurrencyFormat::default());
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.clipboard.sink(), ClipboardSink::Stdout);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ConfigPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load(&paths).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ConfigPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"currency": {"symbol": "CHF"}, "clipboard": {"command": ["pbcopy"]}}"#,
        )
        .unwrap();

        let settings = Settings::load(&paths).unwrap();
        assert_eq!(settings.currency.symbol, "CHF");
        assert_eq!(settings.currency.decimal_separator, ',');
        assert_eq!(settings.log_level, "warn");
        assert_eq!(
            settings.clipboard.sink(),
            ClipboardSink::Command {
                program: "pbcopy".into(),
                args: vec![],
            }
        );
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();

        assert!(matches!(Settings::load_from(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn test_clipboard_command_beats_file() {
        let clipboard = ClipboardSettings {
            command: Some(vec!["wl-copy".into()]),
            file: Some(PathBuf::from("/tmp/clip.json")),
        };
        assert!(matches!(clipboard.sink(), ClipboardSink::Command { .. }));

        let clipboard = ClipboardSettings {
            command: Some(vec![]),
            file: Some(PathBuf::from("/tmp/clip.json")),
        };
        assert_eq!(clipboard.sink(), ClipboardSink::File(PathBuf::from("/tmp/clip.json")));
    }
}
