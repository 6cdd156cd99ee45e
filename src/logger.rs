//! Logger configuration for the dgen CLI.

use env_logger::Env;

/// Initializes the global logger.
///
/// `verbose` raises the default level from info to debug; a `RUST_LOG`
/// environment variable still takes precedence when set.
pub fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();
}
