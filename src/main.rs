mod cli;
mod config;
mod consts;
mod error;
mod extract;
mod pipeline;
mod prompt;
mod sanitize;
mod suggest;
mod utils;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use cli::{Cli, Settings};
use config::Config;
use error::AppError;
use extract::{DocumentExtractor, SourceFile};
use pipeline::Pipeline;
use suggest::{ChatRequester, HttpClient};
use utils::init_logging;

fn run(cli: &Cli) -> Result<(), AppError> {
    let project_dir = std::env::current_dir().map_err(|source| AppError::ConfigRead {
        path: PathBuf::from("."),
        source,
    })?;
    let loaded = Config::load(&project_dir)?;
    let settings = Settings::resolve(cli, &loaded, |key| std::env::var(key).ok());

    let file = SourceFile::open(&cli.file_path)?;

    let pipeline = Pipeline {
        settings: &settings,
        extractor: DocumentExtractor,
        requester: ChatRequester::new(HttpClient),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = pipeline.run(&file, &mut out)?;
    writeln!(out, "{}", outcome.name())?;
    out.flush()?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    // Before logging, so RUST_LOG from .env applies. A missing .env is fine.
    let _ = dotenvy::dotenv();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        tracing::debug!("Terminating: {e:?}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
