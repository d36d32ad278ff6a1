use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lambda_http::tracing;
use launches::StoreError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Launch not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.status_code();
        if let ApiError::Store(err) = &self {
            tracing::error!("store error while reading launches: {err}");
        }
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (code, Json(body)).into_response()
    }
}
