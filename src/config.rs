use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AppError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DefaultsSection {
    #[serde(default)]
    pub(crate) conventions_file: Option<String>,
    #[serde(default)]
    pub(crate) system_prompt_file: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OpenRouterSection {
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    #[serde(default)]
    pub(crate) model: Option<String>,
    #[serde(default)]
    pub(crate) base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) defaults: DefaultsSection,
    #[serde(default)]
    pub(crate) openrouter: OpenRouterSection,
}

/// A parsed config together with where it came from
#[derive(Debug, Default)]
pub(crate) struct LoadedConfig {
    pub(crate) config: Config,
    pub(crate) path: Option<PathBuf>,
}

impl LoadedConfig {
    /// Directory relative paths in the config are resolved against
    pub(crate) fn base_dir(&self) -> Option<&Path> {
        self.path.as_deref().and_then(Path::parent)
    }

    /// Resolve a path from the config file relative to its directory
    pub(crate) fn resolve_path(&self, candidate: Option<&str>) -> Option<PathBuf> {
        let raw = candidate.map(str::trim).filter(|s| !s.is_empty())?;
        let p = PathBuf::from(raw);
        if p.is_absolute() {
            return Some(p);
        }
        match self.base_dir() {
            Some(dir) => Some(dir.join(p)),
            None => Some(p),
        }
    }
}

impl Config {
    /// Load the first config file found, searching from `project_dir`
    pub(crate) fn load(project_dir: &Path) -> Result<LoadedConfig, AppError> {
        Self::load_from(&Self::get_config_paths(project_dir))
    }

    fn load_from(paths: &[PathBuf]) -> Result<LoadedConfig, AppError> {
        for path in paths {
            if !path.is_file() {
                continue;
            }
            let content = fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
                path: path.clone(),
                source,
            })?;
            let config = Self::parse(&content).map_err(|source| AppError::InvalidConfig {
                path: path.clone(),
                source,
            })?;
            tracing::debug!("Loaded config from {}", path.display());
            return Ok(LoadedConfig {
                config,
                path: Some(path.clone()),
            });
        }

        tracing::debug!("No config file found");
        Ok(LoadedConfig::default())
    }

    fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Option<Self> = serde_yaml::from_str(content)?;
        Ok(config.unwrap_or_default())
    }

    fn get_config_paths(project_dir: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Project directory: ./config.yaml
        paths.push(project_dir.join("config.yaml"));

        // 2. XDG config: ~/.config/best-name/config.yaml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("best-name").join("config.yaml"));
        }

        // 3. Platform config dir (macOS Application Support, Windows AppData)
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("best-name").join("config.yaml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        paths
    }
}
