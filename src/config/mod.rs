use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use toml::Value;

/// User configuration, read from `config.toml` in the compatview config
/// directory. Every key is optional; unknown keys warn instead of failing.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub theme: Option<String>,
    /// Rows kept visible above a line the inspector scrolls to
    pub scroll_margin: Option<usize>,
    /// Browser preselected on startup when the report knows it
    pub default_browser: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLoadOutcome {
    pub config: Option<AppConfig>,
    pub warnings: Vec<String>,
}

pub fn config_path() -> Result<PathBuf> {
    #[cfg(windows)]
    {
        let appdata = std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| anyhow!("Could not determine APPDATA for config directory"))?;
        Ok(appdata.join("compatview").join("config.toml"))
    }

    #[cfg(not(windows))]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| !p.as_os_str().is_empty());
        let base = match base {
            Some(base) => base,
            None => std::env::var_os("HOME")
                .map(PathBuf::from)
                .filter(|p| !p.as_os_str().is_empty())
                .map(|home| home.join(".config"))
                .ok_or_else(|| anyhow!("Could not determine HOME for config directory"))?,
        };
        Ok(base.join("compatview").join("config.toml"))
    }
}

pub fn config_path_hint() -> &'static str {
    #[cfg(windows)]
    {
        r"%APPDATA%\compatview\config.toml"
    }

    #[cfg(not(windows))]
    {
        "$XDG_CONFIG_HOME/compatview/config.toml (default: ~/.config/compatview/config.toml)"
    }
}

pub fn load_config() -> Result<ConfigLoadOutcome> {
    let path = config_path()?;
    load_config_from_path(&path)
}

fn load_config_from_path(path: &Path) -> Result<ConfigLoadOutcome> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(ConfigLoadOutcome::default()),
        Err(err) => return Err(err.into()),
    };

    let value: Value = toml::from_str(&contents)?;
    let table = value
        .as_table()
        .ok_or_else(|| anyhow!("Config root must be a TOML table"))?;

    let mut config = AppConfig::default();
    let mut warnings = Vec::new();
    let type_warning = |key: &str, expected: &str| {
        format!("Warning: Config key '{key}' must be {expected}; ignoring value")
    };

    for (key, entry) in table {
        match key.as_str() {
            "theme" => match entry.as_str() {
                Some(theme) => config.theme = Some(theme.to_string()),
                None => warnings.push(type_warning("theme", "a string")),
            },
            "scroll_margin" => match entry.as_integer().filter(|n| *n >= 0) {
                Some(margin) => config.scroll_margin = Some(margin as usize),
                None => warnings.push(type_warning("scroll_margin", "a non-negative integer")),
            },
            "default_browser" => match entry.as_str() {
                Some(browser) => config.default_browser = Some(browser.to_string()),
                None => warnings.push(type_warning("default_browser", "a string")),
            },
            unknown => warnings.push(format!("Warning: Unknown config key '{unknown}', ignoring")),
        }
    }

    Ok(ConfigLoadOutcome {
        config: Some(config),
        warnings,
    })
}
