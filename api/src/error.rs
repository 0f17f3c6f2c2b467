use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use pokedex_http_errors::ErrorResponseData;

use crate::obfuscate_errors::ErrorKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Catalog unavailable: {0}")]
    Upstream(pokedex_catalog::Error),

    #[error("Invalid identifier {0:?}")]
    InvalidIdentifier(String),

    #[error("Missing required field {0}")]
    MissingField(&'static str),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to insert Pokémon team into the database")]
    TeamInsert(#[source] pokedex_db::Error),

    #[error("Database Error: {0}")]
    Db(#[from] pokedex_db::Error),

    #[error("Server error: {0}")]
    ServerError(#[from] hyper::Error),

    #[error(transparent)]
    Generic(#[from] anyhow::Error),
}

impl From<pokedex_catalog::Error> for Error {
    fn from(e: pokedex_catalog::Error) -> Self {
        match e {
            pokedex_catalog::Error::InvalidIdentifier(id) => Error::InvalidIdentifier(id),
            e => Error::Upstream(e),
        }
    }
}

impl Error {
    fn error_kind(&self) -> &'static str {
        match self {
            Error::Upstream(_) => "upstream_unavailable",
            Error::InvalidIdentifier(_) => "bad_request",
            Error::MissingField(_) => "bad_request",
            Error::InvalidBody(_) => "bad_request",
            Error::InvalidRequest(_) => "bad_request",
            Error::TeamInsert(_) => "db_insert_error",
            Error::Db(_) => "db",
            Error::ServerError(_) => "internal_server_error",
            Error::Generic(_) => "internal_server_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            Error::MissingField(_) => StatusCode::BAD_REQUEST,
            Error::InvalidBody(_) => StatusCode::BAD_REQUEST,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn response_tuple(&self) -> (StatusCode, ErrorResponseData) {
        let status = self.status();
        (
            status,
            ErrorResponseData::new(status, self.error_kind(), self.to_string()),
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (code, json) = self.response_tuple();
        let mut response = (code, Json(json)).into_response();
        response
            .extensions_mut()
            .insert(ErrorKind(self.error_kind()));
        response
    }
}
