//! Subscriber setup.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::exporter::file_tracer_provider;
use super::otlp_json::SCOPE_NAME;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;

/// File name of the span export inside the data directory.
pub const TRACE_FILE_NAME: &str = "launcher-search-otlp.json";

/// Installs the global subscriber: an [`EnvFilter`] at
/// `config.trace_level` (default `"info"`) feeding an OpenTelemetry layer
/// that writes spans to `<data dir>/launcher-search-otlp.json`.
///
/// Does nothing if the data directory cannot be created or a global
/// subscriber is already set, so repeated calls are harmless.
///
/// ```
/// use launcher_search::observability::init_tracing;
/// use launcher_search::Config;
///
/// let dir = tempfile::tempdir().unwrap();
/// std::env::set_var("LAUNCHER_SEARCH_DATA_DIR", dir.path());
///
/// let config = Config { trace_level: Some("debug".into()), ..Config::default() };
/// init_tracing(&config);
/// init_tracing(&config);
///
/// tracing::debug!("tracing is active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let tracer = provider.tracer(SCOPE_NAME);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init();
}
