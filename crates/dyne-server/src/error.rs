use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dyne_core::{AssistantError, InsertError, ValidationError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("Restaurant not found")]
    NotFound,

    #[error("No restaurants found in Dyne yet.")]
    EmptyCatalog,

    #[error("Restaurant data is temporarily unavailable, please try again")]
    Unavailable(#[source] dyne_core::StoreError),
}

impl From<AssistantError> for AppError {
    fn from(err: AssistantError) -> Self {
        match err {
            AssistantError::StoreUnavailable(source) => AppError::Unavailable(source),
            AssistantError::EmptyCatalog => AppError::EmptyCatalog,
        }
    }
}

impl From<InsertError> for AppError {
    fn from(err: InsertError) -> Self {
        match err {
            InsertError::Invalid(invalid) => AppError::Invalid(invalid),
            InsertError::Store(source) => AppError::Unavailable(source),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Invalid { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound | AppError::EmptyCatalog => StatusCode::NOT_FOUND,
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Unavailable(source) = &self {
            error!("Store error: {source}");
        }

        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
