use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{event, Level};

/// The `{"error": {"kind": ..., "message": ...}}` body every failed request
/// gets back.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseData {
    error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorDetails {
    kind: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl ErrorResponseData {
    /// Build the body and log it. Server errors are logged at ERROR, everything
    /// else at WARN.
    pub fn new(
        status: StatusCode,
        kind: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> ErrorResponseData {
        let ret = ErrorResponseData {
            error: ErrorDetails {
                kind: kind.into(),
                message: message.into(),
            },
        };

        if status.is_server_error() {
            event!(Level::ERROR, status=%status, kind=%ret.error.kind, message=%ret.error.message);
        } else {
            event!(Level::WARN, status=%status, kind=%ret.error.kind, message=%ret.error.message);
        }

        ret
    }

    pub fn kind(&self) -> &str {
        &self.error.kind
    }

    pub fn message(&self) -> &str {
        &self.error.message
    }
}
