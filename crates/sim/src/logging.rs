//! Tracing setup for the headless binary.

/// Installs a stderr subscriber filtered by `RUST_LOG` (INFO and above by default).
pub fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
