use serde::Deserialize;
use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    /// Name stamped on every bunyan record.
    pub dataset_name: String,
    /// Default filter directive, overridden by `RUST_LOG` when set.
    pub log_level: String,
}

/// Compose multiple layers into a tracing subscriber.
pub fn get_subscriber<Sink>(
    config: &TelemetrySettings,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));
    let formatting_layer = BunyanFormattingLayer::new(config.dataset_name.clone(), sink);

    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

/// Register the subscriber as the global default and redirect `log` records into it.
///
/// Safe to call more than once: later calls are ignored, which keeps test
/// binaries that initialise tracing lazily from panicking.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    let _ = LogTracer::init();
    let _ = set_global_default(subscriber);
}
