use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the fmt subscriber on stderr.
///
/// `RUST_LOG` wins over `level` when set, e.g. `RUST_LOG=calc_core=debug`.
pub fn init(level: tracing::Level) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
