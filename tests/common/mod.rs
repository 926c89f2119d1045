use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by dn and the test suite.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To enable trace level logging of the parser:
///   RUST_LOG=dn=TRACE
///
/// Events are only emitted if the crate was built with the `tracing`
/// feature.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .without_time()
        .try_init()
        .ok();
}
