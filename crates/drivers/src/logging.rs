use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str =
    "warn,lillio_download=info,lillio_download_application=info,lillio_download_adapters=info";

/// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
