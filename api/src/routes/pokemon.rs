use async_trait::async_trait;
use axum::{
    body::HttpBody,
    extract::{FromRequest, State},
    http::{header::CONTENT_TYPE, Request},
    response::IntoResponse,
    routing::{get, post},
    BoxError, Form, Json, Router,
};
use serde_json::json;

use crate::{
    extract::{ApiPath, ApiQuery},
    service::{ListParams, TeamInput},
    shared_state::AppState,
    Error,
};

async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> impl IntoResponse {
    Json(state.service.list_entries(&params).await)
}

async fn get_entry(
    State(state): State<AppState>,
    ApiPath(identifier): ApiPath<String>,
) -> Result<impl IntoResponse, Error> {
    let entry = state.service.entry(identifier.as_str()).await?;
    Ok(Json(entry))
}

/// A team submission, read from a JSON body when the request says so and from
/// a urlencoded form otherwise.
pub struct TeamForm(pub TeamInput);

fn is_json<B>(req: &Request<B>) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.starts_with("application/json"))
        .unwrap_or(false)
}

#[async_trait]
impl<S, B> FromRequest<S, B> for TeamForm
where
    B: HttpBody + Send + 'static,
    B::Data: Send,
    B::Error: Into<BoxError>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        let input = if is_json(&req) {
            Json::<TeamInput>::from_request(req, state)
                .await
                .map_err(|e| Error::InvalidBody(e.body_text()))?
                .0
        } else {
            Form::<TeamInput>::from_request(req, state)
                .await
                .map_err(|e| Error::InvalidBody(e.body_text()))?
                .0
        };

        Ok(TeamForm(input))
    }
}

async fn add_team(
    State(state): State<AppState>,
    TeamForm(input): TeamForm,
) -> Result<impl IntoResponse, Error> {
    let id = state.service.create_team(input).await?;
    Ok(Json(json!({
        "message": "Pokémon team added successfully",
        "data": id,
    })))
}

pub fn configure() -> Router<AppState> {
    Router::new()
        .route("/list", get(list))
        .route("/data/:identifier", get(get_entry))
        .route("/add-team", post(add_team))
}
