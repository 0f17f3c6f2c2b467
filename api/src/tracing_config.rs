use opentelemetry_otlp::WithExportConfig;
use tracing::subscriber::set_global_default;
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};
use tracing_tree::HierarchicalLayer;

pub struct HoneycombConfig {
    pub team: String,
    pub dataset: String,
}

pub enum TracingExportConfig {
    None,
    Honeycomb(HoneycombConfig),
}

impl TracingExportConfig {
    pub fn from_config(config: &mut crate::config::Config) -> TracingExportConfig {
        match config.honeycomb_team.take() {
            Some(team) => TracingExportConfig::Honeycomb(HoneycombConfig {
                team,
                dataset: std::mem::take(&mut config.honeycomb_dataset),
            }),
            None => TracingExportConfig::None,
        }
    }
}

pub fn configure(export_config: TracingExportConfig) -> Result<(), anyhow::Error> {
    LogTracer::builder()
        .ignore_crate("rustls")
        .with_max_level(log::LevelFilter::Debug)
        .init()?;

    let env_filter = EnvFilter::try_from_env("LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let tree = HierarchicalLayer::new(2)
        .with_targets(true)
        .with_bracketed_fields(true);

    let subscriber = Registry::default()
        .with(env_filter)
        .with(tree)
        .with(ErrorLayer::default());

    match export_config {
        TracingExportConfig::Honeycomb(honeycomb_config) => {
            let mut oltp_meta = tonic::metadata::MetadataMap::new();
            oltp_meta.insert("x-honeycomb-team", honeycomb_config.team.parse()?);

            let exporter = opentelemetry_otlp::new_exporter()
                .tonic()
                .with_endpoint("api.honeycomb.io:443")
                .with_metadata(oltp_meta);

            let oltp = opentelemetry_otlp::new_pipeline()
                .tracing()
                .with_trace_config(opentelemetry::sdk::trace::config().with_resource(
                    opentelemetry::sdk::Resource::new(vec![opentelemetry::KeyValue::new(
                        "service.name",
                        honeycomb_config.dataset,
                    )]),
                ))
                .with_exporter(exporter)
                .install_batch(opentelemetry::runtime::TokioCurrentThread)?;
            let telemetry = tracing_opentelemetry::layer().with_tracer(oltp);

            set_global_default(subscriber.with(telemetry))?;
        }
        TracingExportConfig::None => {
            set_global_default(subscriber)?;
        }
    }

    Ok(())
}

pub fn teardown() {
    opentelemetry::global::shutdown_tracer_provider();
}
