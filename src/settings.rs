use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};
use crate::reports::Period;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_dir_string")]
    pub data_dir: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_period")]
    pub default_period: Period,
}

fn default_currency_symbol() -> String {
    "\u{20b9}".to_string()
}

fn default_period() -> Period {
    Period::Daily
}

fn default_data_dir_string() -> String {
    default_data_dir().to_string_lossy().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir_string(),
            currency_symbol: default_currency_symbol(),
            default_period: default_period(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tally")
}

fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tally")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        parse_settings(&content)
    } else {
        Settings::default()
    }
}

fn parse_settings(content: &str) -> Settings {
    serde_json::from_str(content).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable settings file");
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| TallyError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn shellexpand_path(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| PathBuf::from(path))
        .to_string_lossy()
        .to_string()
}
