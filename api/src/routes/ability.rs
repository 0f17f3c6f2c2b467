use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::{extract::ApiPath, shared_state::AppState, Error};

async fn get_ability(
    State(state): State<AppState>,
    ApiPath(ability_name): ApiPath<String>,
) -> Result<impl IntoResponse, Error> {
    let ability = state.service.ability(ability_name.as_str()).await?;
    Ok(Json(ability))
}

pub fn configure() -> Router<AppState> {
    Router::new().route("/data/:ability_name", get(get_ability))
}
