use tracing_subscriber::EnvFilter;

/// Filter used for verbose runs when RUST_LOG is unset
const VERBOSE_FILTER: &str = "warn,best_name=debug";

/// Pick the log filter for this invocation.
///
/// Quiet runs silence everything, including third-party crates, so stdout
/// carries only the name and stderr only real errors.
pub(crate) fn filter_directives(verbose: bool, rust_log: Option<&str>) -> String {
    if !verbose {
        return "off".to_string();
    }
    rust_log
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(VERBOSE_FILTER)
        .to_string()
}

/// Install the global subscriber, writing to stderr
pub(crate) fn init_logging(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = filter_directives(verbose, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(VERBOSE_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
