//! Settings resolution
//!
//! Each value is an ordered chain of optional layers; the first non-blank
//! layer wins and a hardcoded default closes the chain where one exists.

use std::path::PathBuf;

use crate::config::LoadedConfig;
use crate::consts::{
    API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, MODEL_ENV,
};

use super::Cli;

/// Fully resolved settings for one invocation
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    /// Checked by the pipeline, not here, so the error surfaces before extraction
    pub(crate) api_key: Option<String>,
    pub(crate) model: String,
    pub(crate) base_url: String,
    pub(crate) conventions_file: Option<PathBuf>,
    pub(crate) system_prompt_file: Option<PathBuf>,
    pub(crate) config_path: Option<PathBuf>,
    pub(crate) verbose: bool,
}

/// First layer holding a non-blank value, trimmed
fn first_present<I>(layers: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    layers
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
}

impl Settings {
    /// Resolve settings from CLI args, environment and config file.
    ///
    /// API key: env > CLI > config. Model and base URL: CLI > env > config > default.
    pub(crate) fn resolve<E>(cli: &Cli, loaded: &LoadedConfig, env: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let openrouter = &loaded.config.openrouter;
        let defaults = &loaded.config.defaults;

        let api_key = first_present([
            env(API_KEY_ENV),
            cli.api_key.clone(),
            openrouter.api_key.clone(),
        ]);

        let model = first_present([
            cli.model.clone(),
            env(MODEL_ENV),
            openrouter.model.clone(),
        ])
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = first_present([
            cli.base_url.clone(),
            env(BASE_URL_ENV),
            openrouter.base_url.clone(),
        ])
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let conventions_file = cli
            .conventions
            .clone()
            .or_else(|| loaded.resolve_path(defaults.conventions_file.as_deref()));
        let system_prompt_file = cli
            .system_prompt
            .clone()
            .or_else(|| loaded.resolve_path(defaults.system_prompt_file.as_deref()));

        Self {
            api_key,
            model,
            base_url,
            conventions_file,
            system_prompt_file,
            config_path: loaded.path.clone(),
            verbose: cli.verbose,
        }
    }
}

/// Mask all but the last four characters of a secret
pub(crate) fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 4 {
        return "***".to_string();
    }
    let tail: String = secret.chars().skip(len - 4).collect();
    format!("{}{}", "*".repeat(len - 4), tail)
}
