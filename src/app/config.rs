use crate::search::SearchOptions;
use crate::theme::PaletteType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::trigger::{KeyBinding, TriggerBinding};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub theme: PaletteType,
    pub toggle_key: String,
    pub catalog: CatalogConfig,
    pub search: SearchConfig,
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: PaletteType::CatppuccinMocha,
            toggle_key: "ctrl+j".to_string(),
            catalog: CatalogConfig::default(),
            search: SearchConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Optional overrides for the bundled catalog data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CatalogConfig {
    pub blocks: Option<PathBuf>,
    pub patterns: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    pub threshold: f64,
    pub distance: usize,
    pub title_weight: f64,
    pub description_weight: f64,
    pub name_weight: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let defaults = SearchOptions::default();
        Self {
            threshold: defaults.threshold,
            distance: defaults.distance,
            title_weight: defaults.title_weight,
            description_weight: defaults.description_weight,
            name_weight: defaults.name_weight,
        }
    }
}

impl From<&SearchConfig> for SearchOptions {
    fn from(c: &SearchConfig) -> Self {
        Self {
            threshold: c.threshold.clamp(0.0, 1.0),
            distance: c.distance,
            title_weight: c.title_weight.max(0.0),
            description_weight: c.description_weight.max(0.0),
            name_weight: c.name_weight.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

pub fn config_dir() -> Option<PathBuf> {
    home::home_dir().map(|mut path| {
        path.push(".config");
        path.push("jump");
        path
    })
}

impl Config {
    /// Loads `~/.config/jump/config.toml`. A missing file yields defaults; a
    /// malformed one is an error.
    pub fn load() -> Result<Self> {
        match config_dir() {
            Some(dir) => Self::load_from(&dir.join("config.toml")),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.trigger()?;
        Ok(config)
    }

    pub fn trigger(&self) -> Result<TriggerBinding> {
        let toggle: KeyBinding = self
            .toggle_key
            .parse()
            .context("invalid `toggle_key` in config")?;
        Ok(TriggerBinding::new(toggle))
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.log
            .file
            .clone()
            .or_else(|| config_dir().map(|dir| dir.join("jump.log")))
    }
}
