use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{DefaultLabels, LocationNames};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) server_url: Option<String>,
    #[serde(default)]
    pub(crate) input: Option<String>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) no_color: bool,
    #[serde(default)]
    pub(crate) debug: bool,
    #[serde(default)]
    pub(crate) quiet: bool,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    /// Chart colors, cycled; empty means the built-in palette
    #[serde(default)]
    pub(crate) palette: Vec<String>,
    #[serde(default)]
    pub(crate) labels: DefaultLabels,
    /// "lat_lon" (4 decimals) -> place name
    #[serde(default)]
    pub(crate) locations: LocationNames,
}

/// Outcome of config discovery. Logging is not up yet when this runs, so
/// problems are collected and reported by the caller.
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
    pub(crate) warnings: Vec<String>,
}

impl Config {
    /// Load an explicitly requested file; any failure is fatal
    pub(crate) fn load_from(path: &Path) -> Result<LoadedConfig, AppError> {
        let content = fs::read_to_string(path).map_err(|e| AppError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = toml::from_str::<Config>(&content).map_err(|e| AppError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(LoadedConfig {
            config,
            path: Some(path.to_path_buf()),
            warnings: Vec::new(),
        })
    }

    /// First parseable file from the default locations, or defaults
    pub(crate) fn discover() -> LoadedConfig {
        let mut warnings = Vec::new();

        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        return LoadedConfig {
                            config,
                            path: Some(path),
                            warnings,
                        };
                    }
                    Err(e) => {
                        warnings.push(format!("Failed to parse {}: {}", path.display(), e));
                    }
                }
            }
        }

        LoadedConfig {
            warnings,
            ..Default::default()
        }
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/safespeak/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("safespeak").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/safespeak/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("safespeak").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.safespeak.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".safespeak.toml"));
        }

        paths
    }
}
