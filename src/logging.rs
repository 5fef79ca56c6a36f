//! Logging initialization utilities.

use env_logger::Env;

/// Initialize logging. `RUST_LOG` wins over the verbosity default.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let env = Env::default().default_filter_or(default_filter);
    // A second init (e.g. from tests driving `run_with_args`) is harmless.
    let _ = env_logger::Builder::from_env(env).try_init();
}
