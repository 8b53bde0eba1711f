//! `env_logger` setup shared by the command-line tools.

/// Install the global logger. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_filter),
    )
    .format_target(false)
    .format_timestamp(None)
    .try_init();
}
