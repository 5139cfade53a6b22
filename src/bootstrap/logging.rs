use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn initialize(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
