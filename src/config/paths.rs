//! Config path resolution.
//!
//! 1. `COSTCALC_CONFIG_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/costcalc`
//! 3. `~/.config/costcalc` (`%APPDATA%\costcalc` on Windows)

use std::path::{Path, PathBuf};

use crate::application::AppError;

pub const CONFIG_DIR_ENV: &str = "COSTCALC_CONFIG_DIR";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    base_dir: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, AppError> {
        let base_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(custom) => PathBuf::from(custom),
            Err(_) => resolve_default_path()?,
        };
        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, AppError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| AppError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("costcalc"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, AppError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| AppError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("costcalc"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ConfigPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }
}
