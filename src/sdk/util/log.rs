use env_logger::{Builder, Env};

/// Installs the global logger. `RUST_LOG` takes precedence over `default_level`.
pub fn init_logging(default_level: &str) {
    // a second call (e.g. from tests) keeps the first logger
    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();
}
