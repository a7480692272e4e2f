use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber.
///
/// `--debug` forces `debug`; otherwise `RUST_LOG` wins over the configured filter.
pub fn init(debug: bool, configured: &str) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
