use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use contactform_shared::ContactError;
use contactform_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Validation(#[from] ContactError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Database unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // Every failure of the create route is reported as 400 with the raw
        // error text; clients display `message` verbatim.
        match &self {
            ServerError::Store(_) | ServerError::StoreUnavailable(_) | ServerError::Internal(_) => {
                tracing::error!(error = %self, "Contact could not be persisted");
            }
            ServerError::BadRequest(_) | ServerError::Validation(_) => {
                tracing::debug!(error = %self, "Contact rejected");
            }
        }

        let body = serde_json::json!({
            "message": self.to_string(),
        });

        (StatusCode::BAD_REQUEST, axum::Json(body)).into_response()
    }
}
