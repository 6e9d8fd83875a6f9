use env_logger::Env;

/// Routes `log` output to stderr. Defaults to `info`; `RUST_LOG` overrides.
pub fn init() {
    // a second call (e.g. from tests) keeps the first logger
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init();
}
