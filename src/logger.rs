use tracing_subscriber::EnvFilter;

/// Installs the global tracing subscriber. Progress goes to stderr so build
/// tools capturing stdout see only the task's own output. `RUST_LOG`
/// overrides the level picked from the verbosity flag.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
