pub mod config;
pub mod error;
pub mod extract;
pub mod obfuscate_errors;
pub mod panic_handler;
pub mod routes;
pub mod service;
pub mod shared_state;
pub mod tracing_config;

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{routing::IntoMakeService, Router};
use hyper::server::conn::AddrIncoming;
use pokedex_catalog::CatalogClient;
use pokedex_db::{PgTeamStore, SchemaStatus, TeamStore};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::MakeRequestUuid,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
    ServiceBuilderExt,
};
use tracing::{event, Level};

pub use crate::error::Error;
use crate::{
    obfuscate_errors::ObfuscateErrorLayer,
    service::Aggregator,
    shared_state::{AppState, InnerState},
};

pub struct Server {
    pub host: String,
    pub port: u16,
    pub server: axum::Server<AddrIncoming, IntoMakeService<Router>>,
}

impl Server {
    /// Serve until Ctrl-C is received.
    pub async fn run(self) -> Result<(), Error> {
        self.server
            .with_graceful_shutdown(async {
                tokio::signal::ctrl_c().await.ok();
                event!(Level::INFO, "Shutting down");
            })
            .await?;
        Ok(())
    }
}

/// Start a server backed by PostgreSQL.
pub async fn run_server(config: config::Config) -> Result<Server, anyhow::Error> {
    let pool = pokedex_db::connect(config.database_url.as_str(), config.db_max_connections)?;
    let teams = Arc::new(PgTeamStore::new(pool));
    run_server_with_store(config, teams).await
}

/// Start a server on top of an already constructed team store.
pub async fn run_server_with_store(
    config: config::Config,
    teams: Arc<dyn TeamStore>,
) -> Result<Server, anyhow::Error> {
    match teams.ensure_schema().await? {
        SchemaStatus::Created => event!(Level::INFO, "Created team table"),
        SchemaStatus::Existing => event!(Level::DEBUG, "Team table already present"),
    }

    let catalog = CatalogClient::new(config.catalog_url.as_str())?;
    event!(Level::INFO, catalog = %catalog.base_url(), "Using species catalog");

    let production = config.production();
    let state = Arc::new(InnerState {
        production,
        service: Aggregator::new(catalog, teams),
    });

    let app = build_app(state);

    let bind_ip: IpAddr = config.host.parse()?;
    let addr = SocketAddr::from((bind_ip, config.port));
    let server = axum::Server::try_bind(&addr)?.serve(app.into_make_service());
    let port = server.local_addr().port();
    event!(Level::INFO, "Listening on {}:{}", config.host, port);

    Ok(Server {
        host: config.host,
        port,
        server,
    })
}

pub fn build_app(state: AppState) -> Router {
    let production = state.production;
    routes::configure_routes().with_state(state).layer(
        // Global middlewares
        ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(move |err| {
                panic_handler::handle_panic(production, err)
            }))
            .layer(ObfuscateErrorLayer::new(production))
            .compression()
            .set_x_request_id(MakeRequestUuid)
            .propagate_x_request_id()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO))
                    .on_request(DefaultOnRequest::new().level(Level::INFO)),
            )
            .into_inner(),
    )
}
