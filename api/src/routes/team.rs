use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;

use crate::{service::TeamListing, shared_state::AppState, Error};

async fn list_teams(State(state): State<AppState>) -> Result<Response, Error> {
    let response = match state.service.all_teams().await? {
        TeamListing::Teams(teams) => Json(teams).into_response(),
        TeamListing::Empty => Json(json!({ "message": "no teams found" })).into_response(),
    };

    Ok(response)
}

pub fn configure() -> Router<AppState> {
    Router::new().route("/all", get(list_teams))
}
