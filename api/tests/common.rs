use std::sync::Arc;

use anyhow::Result;
use futures::Future;
use once_cell::sync::Lazy;
use pokedex_api::{config::Config, Server};
use pokedex_test::MemoryTeamStore;
use wiremock::MockServer;

pub use crate::client::*;

pub struct TestApp {
    /// Stands in for the species catalog.
    pub upstream: MockServer,
    pub teams: Arc<MemoryTeamStore>,
    /// A client set to the `/api` base url of the server.
    pub client: TestClient,
    /// A client set to the root of the server.
    pub root_client: TestClient,
}

fn test_config(catalog_url: String) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0, // Bind to random port
        env: "test".to_string(),
        database_url: String::new(),
        db_max_connections: 1,
        catalog_url,
        honeycomb_team: None,
        honeycomb_dataset: String::new(),
    }
}

pub async fn start_app(teams: Arc<MemoryTeamStore>) -> Result<TestApp> {
    Lazy::force(&pokedex_test::TRACING);
    let upstream = MockServer::start().await;

    let Server { server, host, port } =
        pokedex_api::run_server_with_store(test_config(upstream.uri()), teams.clone()).await?;
    tokio::task::spawn(server);

    let address = format!("{}:{}", host, port);
    Ok(TestApp {
        client: TestClient::new(format!("http://{}/api", address)),
        root_client: TestClient::new(format!("http://{}", address)),
        upstream,
        teams,
    })
}

pub async fn run_app_test<F, R>(f: F)
where
    F: FnOnce(TestApp) -> R,
    R: Future<Output = Result<(), anyhow::Error>>,
{
    run_app_test_with_store(MemoryTeamStore::new(), f).await
}

pub async fn run_app_test_with_store<F, R>(teams: MemoryTeamStore, f: F)
where
    F: FnOnce(TestApp) -> R,
    R: Future<Output = Result<(), anyhow::Error>>,
{
    let app = start_app(Arc::new(teams)).await.expect("Starting app");
    f(app).await.unwrap();
}
