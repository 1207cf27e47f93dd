use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` controls filtering (default `info`); `json` switches to
/// one JSON object per line.
pub fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    // try_init so a second call (tests, embedding) is a no-op.
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
