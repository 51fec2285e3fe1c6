use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// The filter comes from `RUST_LOG` when it is set, otherwise from `level`
/// (e.g. `"info"` or `"hotel_reservation=debug"`). Calling this more than
/// once keeps the first subscriber.
pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    #[cfg(not(test))]
    let builder = builder.with_writer(std::io::stderr);
    // unit tests share the global subscriber; keep their output captured
    #[cfg(test)]
    let builder = builder.with_test_writer();

    let installed = builder.try_init().is_ok();

    if installed {
        tracing::debug!("Logger initialized");
    }
}
