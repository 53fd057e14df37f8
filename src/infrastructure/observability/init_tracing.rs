use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use super::TracingConfig;

const DEFAULT_FILTER: &str = "info,vellum=debug,tower_http=debug";

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// filter; `config` decides between human-readable and JSON output.
pub fn init_tracing(config: TracingConfig, port: u16) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let base = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    let registry = tracing_subscriber::registry().with(filter);
    if config.json_format {
        registry.with(base.json()).init();
    } else {
        registry.with(base).init();
    }

    tracing::info!(
        port,
        environment = %config.environment,
        json = config.json_format,
        "Telemetry initialized"
    );
}
