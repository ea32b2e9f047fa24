//! Extract a restaurant id from the `:id` path segment.

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// Restaurant primary key taken from the path. A segment that is not an
/// integer cannot name a restaurant, so it is rejected as not found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestaurantId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RestaurantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::restaurant_not_found())?;
        raw.trim()
            .parse::<i64>()
            .map(RestaurantId)
            .map_err(|_| AppError::restaurant_not_found())
    }
}
