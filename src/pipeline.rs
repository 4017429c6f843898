//! Naming pipeline
//!
//! API key check -> extraction -> (empty: `untitled_{ext}`) -> prompt ->
//! suggestion request -> sanitization.

use std::io::Write;
use std::path::Path;

use crate::cli::{Settings, mask_secret};
use crate::consts::{API_KEY_ENV, DEFAULT_SYSTEM_PROMPT, NO_EXTENSION};
use crate::error::AppError;
use crate::extract::{ContentExtractor, SourceFile, read_text_file};
use crate::prompt::{Prompt, assemble};
use crate::sanitize::sanitize_filename;
use crate::suggest::{Suggestion, SuggestionRequester, build_request};

/// How the final name was produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// No usable content; the model was not called
    Fallback(String),
    /// Sanitized model suggestion
    Suggested(String),
}

impl Outcome {
    pub(crate) fn name(&self) -> &str {
        match self {
            Outcome::Fallback(name) | Outcome::Suggested(name) => name,
        }
    }
}

/// `untitled_{ext}`, or `untitled_file` without an extension
pub(crate) fn fallback_name(extension: &str) -> String {
    let ext = if extension.is_empty() {
        NO_EXTENSION
    } else {
        extension
    };
    format!("untitled_{ext}")
}

/// Writes verbose diagnostics; silent otherwise
struct Narrator<'w> {
    out: &'w mut dyn Write,
    enabled: bool,
}

impl Narrator<'_> {
    fn line(&mut self, text: impl AsRef<str>) -> std::io::Result<()> {
        if self.enabled {
            writeln!(self.out, "{}", text.as_ref())?;
        }
        Ok(())
    }
}

fn describe_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
}

fn load_document(path: Option<&Path>) -> Option<String> {
    path.filter(|p| p.exists()).map(read_text_file)
}

pub(crate) struct Pipeline<'a, E, R> {
    pub(crate) settings: &'a Settings,
    pub(crate) extractor: E,
    pub(crate) requester: R,
}

impl<E: ContentExtractor, R: SuggestionRequester> Pipeline<'_, E, R> {
    /// Name `file`, writing verbose diagnostics (if enabled) to `out`.
    ///
    /// The returned name is not written; the caller prints it as the last line.
    pub(crate) fn run(&self, file: &SourceFile, out: &mut dyn Write) -> Result<Outcome, AppError> {
        let settings = self.settings;
        let mut say = Narrator {
            out,
            enabled: settings.verbose,
        };

        // Must fail before any file is touched
        let api_key = settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AppError::Configuration(format!(
                    "{API_KEY_ENV} is required. Set the env var, pass --api-key, or set openrouter.api_key in config.yaml."
                ))
            })?;

        say.line("=== best-name (verbose) ===")?;
        say.line("")?;
        say.line("Configuration")?;
        say.line(format!("  Config file: {}", describe_path(settings.config_path.as_deref())))?;
        say.line(format!(
            "  Conventions file: {}",
            describe_path(settings.conventions_file.as_deref())
        ))?;
        say.line(format!(
            "  System prompt file: {}",
            describe_path(settings.system_prompt_file.as_deref())
        ))?;
        say.line(format!("  Model: {}", settings.model))?;
        say.line(format!("  Base URL: {}", settings.base_url))?;
        say.line(format!("  API key: {}", mask_secret(api_key)))?;

        let conventions = load_document(settings.conventions_file.as_deref()).unwrap_or_default();
        let system_prompt = load_document(settings.system_prompt_file.as_deref())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        say.line("")?;
        say.line("Prompt documents")?;
        say.line(format!("  Conventions: {} characters", conventions.chars().count()))?;
        say.line(format!("  System prompt: {} characters", system_prompt.chars().count()))?;

        say.line("")?;
        say.line(format!("Extracting content from {}", file.path.display()))?;
        let content = self.extractor.extract(file);
        if content.trim().is_empty() {
            say.line("  No content extracted, using generic name")?;
            return Ok(Outcome::Fallback(fallback_name(&file.extension)));
        }
        say.line(format!("  Content extracted: {} characters", content.chars().count()))?;

        let prompt = assemble(&system_prompt, &conventions, &content);
        narrate_prompt(&mut say, &prompt)?;

        say.line("")?;
        say.line("Requesting suggestion")?;
        let suggestion = self.requester.request(
            api_key,
            &settings.base_url,
            &settings.model,
            &prompt.messages,
            settings.verbose,
        )?;
        if settings.verbose {
            narrate_exchange(&mut say, &settings.model, &prompt, &suggestion)?;
        }

        let name = sanitize_filename(Some(&suggestion.raw));
        say.line(format!("  Raw response: '{}'", suggestion.raw))?;
        say.line(format!("  Sanitized filename: '{name}'"))?;
        say.line("")?;
        say.line("=== Final Result ===")?;

        Ok(Outcome::Suggested(name))
    }
}

fn narrate_prompt(say: &mut Narrator<'_>, prompt: &Prompt) -> std::io::Result<()> {
    say.line("")?;
    say.line("Prompt")?;
    say.line(format!("  Content truncated to: {} characters", prompt.content_chars))?;
    for msg in &prompt.messages {
        say.line("")?;
        say.line(format!("--- {} message ---", msg.role.as_str()))?;
        say.line(&msg.content)?;
    }
    say.line("")?;
    for (i, msg) in prompt.messages.iter().enumerate() {
        say.line(format!(
            "Message {} ({}): {} characters",
            i + 1,
            msg.role.as_str(),
            msg.content.chars().count()
        ))?;
    }
    Ok(())
}

fn narrate_exchange(
    say: &mut Narrator<'_>,
    model: &str,
    prompt: &Prompt,
    suggestion: &Suggestion,
) -> std::io::Result<()> {
    let Some(response) = &suggestion.diagnostics else {
        return Ok(());
    };
    let request = build_request(model, &prompt.messages);
    say.line("")?;
    say.line("--- Request ---")?;
    say.line(serde_json::to_string_pretty(&request).unwrap_or_default())?;
    say.line("")?;
    say.line("--- Response ---")?;
    say.line(serde_json::to_string_pretty(response).unwrap_or_default())?;

    if let Some(usage) = suggestion.usage() {
        let count = |n: Option<u64>| n.map_or_else(|| "N/A".to_string(), |n| n.to_string());
        say.line("")?;
        say.line("Token usage")?;
        say.line(format!("  Prompt tokens: {}", count(usage.prompt_tokens)))?;
        say.line(format!("  Completion tokens: {}", count(usage.completion_tokens)))?;
        say.line(format!("  Total tokens: {}", count(usage.total_tokens)))?;
    }
    say.line("")?;
    Ok(())
}
