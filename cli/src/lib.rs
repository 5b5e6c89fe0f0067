pub mod cmd;
pub mod util;

/// `RUST_LOG` wins over `verbose`.
pub fn init_logger(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let default_filter = format!(
        "warn,cft_cli={0},cft_core={0},cft_webclient={0},fsutil={0}",
        level
    );
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
