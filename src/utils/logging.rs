use tracing_subscriber::EnvFilter;

/// Initialize tracing for the application.
///
/// The configured level is the default; a `RUST_LOG` directive in the
/// environment takes precedence.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // try_init so tests and libraries can call this multiple times without panicking
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
