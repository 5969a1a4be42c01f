use tracing_subscriber::{EnvFilter, fmt};

/// Initializes logging for the command-line tool
///
/// Log lines go to stderr so stdout carries only metric sentences.
///
/// # Environment
/// - `RUST_LOG`: level filter (default `info`),
///   e.g. `RUST_LOG=debug` or `RUST_LOG=pizza_metrics=trace`
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// Debug-level logging captured by the test harness, safe to call from every test
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
