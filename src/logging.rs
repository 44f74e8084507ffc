use tracing_subscriber::EnvFilter;

/// Map `-v` counts onto a tracing level. `RUST_LOG` takes precedence.
pub fn default_log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize diagnostics on stderr. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbose: u8, quiet: bool) {
    let level = default_log_level(verbose, quiet);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("minitools={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init();
}
