use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging to stderr so report output on stdout stays clean.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between debug and warn
/// for this crate.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let default_filter = format!("pocketdash={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init();
}
