//! Error to HTTP response mapping

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::error::PlacenamesError;
use crate::render::{html, Representation};

/// Body sent whenever the data store cannot be queried
pub const OFFLINE_MESSAGE: &str = "The Place Names database is offline";

const CONFIGURATION_MESSAGE: &str =
    "The Place Names service is misconfigured for this resource";

const SERIALIZATION_MESSAGE: &str = "The resource could not be serialized";

/// A library error plus the representation the client asked for
#[derive(Debug)]
pub struct ApiError {
    pub error: PlacenamesError,
    pub representation: Representation,
}

impl ApiError {
    pub fn new(error: PlacenamesError, representation: Representation) -> Self {
        Self {
            error,
            representation,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.error {
            PlacenamesError::NotFound(_) => StatusCode::NOT_FOUND,
            PlacenamesError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PlacenamesError::DataStoreUnavailable(_)
            | PlacenamesError::Configuration(_)
            | PlacenamesError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PlacenamesError> for ApiError {
    fn from(error: PlacenamesError) -> Self {
        Self::new(error, Representation::Html)
    }
}

fn plain(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        body,
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self.error {
            PlacenamesError::DataStoreUnavailable(cause) => {
                error!("Data store query failed: {}", cause);
                plain(status, OFFLINE_MESSAGE.to_string())
            }
            PlacenamesError::Configuration(cause) => {
                error!("Configuration error: {}", cause);
                plain(status, CONFIGURATION_MESSAGE.to_string())
            }
            PlacenamesError::Serialization { format, message } => {
                error!("Failed to serialize {}: {}", format, message);
                plain(status, SERIALIZATION_MESSAGE.to_string())
            }
            PlacenamesError::BadRequest(message) => {
                warn!("Bad request: {}", message);
                plain(status, message)
            }
            PlacenamesError::NotFound(id) => match self.representation {
                Representation::Html => (
                    status,
                    [(header::CONTENT_TYPE, Representation::Html.content_type())],
                    html::not_found_page(&id),
                )
                    .into_response(),
                _ => plain(status, format!("No resource with identifier '{}'", id)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (PlacenamesError::unavailable("refused"), StatusCode::INTERNAL_SERVER_ERROR),
            (PlacenamesError::NotFound("ZZ00000".into()), StatusCode::NOT_FOUND),
            (PlacenamesError::Configuration("ZZ".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (PlacenamesError::serialization("Turtle", "bad"), StatusCode::INTERNAL_SERVER_ERROR),
            (PlacenamesError::BadRequest("page".into()), StatusCode::BAD_REQUEST),
        ];
        for (error, expected) in cases {
            assert_eq!(ApiError::from(error).status_code(), expected);
        }
    }

    #[test]
    fn test_offline_response_is_plain_text() {
        let response =
            ApiError::from(PlacenamesError::unavailable("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }

    #[test]
    fn test_not_found_follows_representation() {
        let html = ApiError::new(PlacenamesError::NotFound("X".into()), Representation::Html)
            .into_response();
        assert_eq!(html.headers()[header::CONTENT_TYPE], "text/html; charset=utf-8");

        let ttl = ApiError::new(PlacenamesError::NotFound("X".into()), Representation::Turtle)
            .into_response();
        assert_eq!(ttl.headers()[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    }
}
