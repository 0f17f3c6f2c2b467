use clap::Parser;
use pokedex_api::{config::Config, tracing_config, tracing_config::TracingExportConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    let mut config = Config::parse();

    tracing_config::configure(TracingExportConfig::from_config(&mut config))?;

    let server = pokedex_api::run_server(config).await?;
    server.run().await?;

    tracing_config::teardown();

    Ok(())
}
