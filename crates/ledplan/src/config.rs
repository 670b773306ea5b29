use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::catalog::{Controller, ControllerCatalog};
use crate::plan::PlannerConfig;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "ledplan";

const VALID_KEYS: &str = "planner.pixel_limit_per_port, planner.layout.corridor_count, \
    planner.layout.corridor_spacing, planner.layout.backup_offset, \
    planner.power.default_run_length";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Replaces the built-in controller catalog when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Vec<Controller>>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `ledplan config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.planner.validate()?;
        Ok(config)
    }

    /// The saved configuration, or defaults when no file has been written
    /// yet. A file that exists but cannot be read or parsed is an error.
    pub fn load_or_default() -> Result<Self> {
        match Self::path() {
            Ok(path) => Self::load_or_default_from(&path),
            Err(e) => {
                debug!("Using default configuration: {e}");
                Ok(Self::default())
            }
        }
    }

    pub fn load_or_default_from(path: &Path) -> Result<Self> {
        match path.try_exists() {
            Ok(false) => {
                debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            _ => Self::load_from(path),
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# ledplan configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The controller catalog in effect: the configured one, or the built-in.
    pub fn catalog(&self) -> Result<ControllerCatalog> {
        match &self.catalog {
            Some(controllers) => Ok(ControllerCatalog::new(controllers.clone())?),
            None => Ok(ControllerCatalog::builtin()),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let planner = &mut self.planner;
        match key {
            "planner.pixel_limit_per_port" => {
                planner.pixel_limit_per_port = parse_positive(key, value)?;
            }
            "planner.layout.corridor_count" => {
                planner.layout.corridor_count = parse_positive::<usize>(key, value)?;
            }
            "planner.layout.corridor_spacing" => {
                planner.layout.corridor_spacing = parse_length(key, value)?;
            }
            "planner.layout.backup_offset" => {
                planner.layout.backup_offset = parse_length(key, value)?;
            }
            "planner.power.default_run_length" => {
                planner.power.default_run_length = parse_positive::<usize>(key, value)?;
            }
            _ => anyhow::bail!("Unknown config key: {key}. Valid keys: {VALID_KEYS}"),
        }
        Ok(())
    }
}

fn parse_positive<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    match value.parse::<T>() {
        Ok(v) if v > T::default() => Ok(v),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a positive whole number."),
    }
}

fn parse_length(key: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be a non-negative number."),
    }
}
