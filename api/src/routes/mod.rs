use axum::Router;

use crate::shared_state::AppState;

mod ability;
mod health;
mod pokemon;
mod team;

pub fn configure_routes() -> Router<AppState> {
    let api_routes = Router::new()
        .nest("/pokemon/v1", pokemon::configure())
        .nest("/ability/v1", ability::configure())
        .nest("/pokemon_team/v1", team::configure());

    Router::new()
        .merge(health::configure())
        .nest("/api", api_routes)
}
