//! Typed errors and HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::{MAX_PRICE, MIN_PRICE};
use crate::response::{ErrorBody, ErrorsBody};

/// Status used for every validation failure on creation.
pub const VALIDATION_STATUS: StatusCode = StatusCode::UNPROCESSABLE_ENTITY;

/// The only message callers ever see for a rejected association.
pub const VALIDATION_MESSAGE: &str = "validation errors";

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Raised by the model layer when an entity would violate its own invariants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("price {0} out of range: must be between {} and {}", MIN_PRICE, MAX_PRICE)]
    PriceOutOfRange(i64),
}

/// A single reason a restaurant pizza request was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("body must be a JSON object")]
    NotAnObject,
    #[error("price is required")]
    MissingPrice,
    #[error("price must be an integer")]
    PriceNotInteger,
    #[error(transparent)]
    Price(#[from] ModelError),
    #[error("pizza_id does not reference an existing pizza")]
    UnknownPizza,
    #[error("restaurant_id does not reference an existing restaurant")]
    UnknownRestaurant,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("validation failed: {0:?}")]
    Validation(Vec<ValidationFailure>),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Json(#[from] JsonRejection),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

impl AppError {
    pub fn restaurant_not_found() -> Self {
        AppError::NotFound(RESTAURANT_NOT_FOUND.into())
    }

    /// Database rejections of an insert that mean the input was bad rather than the server.
    pub fn from_insert(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_check_violation() || db.is_foreign_key_violation() {
                tracing::debug!(error = %db, "insert rejected by constraint");
                return AppError::Validation(Vec::new());
            }
        }
        AppError::Db(err)
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

fn validation_response() -> Response {
    (
        VALIDATION_STATUS,
        Json(ErrorsBody {
            errors: vec![VALIDATION_MESSAGE.to_string()],
        }),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
            AppError::Validation(failures) => {
                tracing::debug!(?failures, "validation failed");
                validation_response()
            }
            AppError::Model(e) => {
                tracing::debug!(error = %e, "model rejected entity");
                validation_response()
            }
            AppError::Json(rejection) => error_response(rejection.status(), rejection.body_text()),
            AppError::Db(e) => {
                tracing::error!(error = %e, "database error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error".into())
            }
        }
    }
}
