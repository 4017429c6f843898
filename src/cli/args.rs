//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "best-name")]
#[command(
    about = "Suggest the best filename for FILE based on its content",
    version
)]
pub(crate) struct Cli {
    /// File to name
    #[arg(value_name = "FILE")]
    pub(crate) file_path: PathBuf,

    /// Path to conventions markdown file
    #[arg(long = "conventions", value_name = "PATH")]
    pub(crate) conventions: Option<PathBuf>,

    /// Path to system prompt markdown file
    #[arg(long = "system-prompt", value_name = "PATH")]
    pub(crate) system_prompt: Option<PathBuf>,

    /// OpenRouter API key
    #[arg(long = "api-key", value_name = "KEY")]
    pub(crate) api_key: Option<String>,

    /// LLM model name
    #[arg(long, value_name = "MODEL")]
    pub(crate) model: Option<String>,

    /// OpenRouter base URL
    #[arg(long = "base-url", value_name = "URL")]
    pub(crate) base_url: Option<String>,

    /// Show detailed processing steps
    #[arg(short, long)]
    pub(crate) verbose: bool,
}
