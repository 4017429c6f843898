/// Hard cap on file content sent to the model, in characters
pub(crate) const MAX_CONTENT_CHARS: usize = 12_000;

/// Maximum length of a sanitized filename, in characters
pub(crate) const MAX_NAME_CHARS: usize = 120;

/// Fallback name when sanitization leaves nothing usable
pub(crate) const UNTITLED: &str = "untitled";

/// Extension token used by the no-content fallback when the file has no suffix
pub(crate) const NO_EXTENSION: &str = "file";

pub(crate) const DEFAULT_MODEL: &str = "gpt-5-mini";
pub(crate) const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub(crate) const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that names files based on content.";

pub(crate) const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
pub(crate) const MODEL_ENV: &str = "OPENROUTER_MODEL";
pub(crate) const BASE_URL_ENV: &str = "OPENROUTER_BASE_URL";

/// Low temperature biases the model toward short, deterministic answers
pub(crate) const TEMPERATURE: f64 = 0.2;
pub(crate) const MAX_TOKENS: u32 = 32;
