//! Association creation.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::response::{created, ErrorBody, ErrorsBody, RestaurantPizzaCreated};
use crate::service::CrudService;
use crate::state::AppState;

/// Documented request shape. The handler reads the raw JSON so that a float
/// or string price is reported as a validation failure, not a decode error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantPizza {
    /// Integer between 1 and 30.
    pub price: i64,
    pub pizza_id: i64,
    pub restaurant_id: i64,
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizza,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaCreated),
        (status = 400, description = "Malformed JSON", body = ErrorBody),
        (status = 422, description = "Validation failed", body = ErrorsBody),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip_all)]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let row = CrudService::create_restaurant_pizza(&state.pool, &body).await?;
    Ok(created(row))
}
