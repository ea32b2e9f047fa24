//! Restaurant listing, detail and delete.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::RestaurantId;
use crate::models::Restaurant;
use crate::response::{ok, ErrorBody, RestaurantDetail};
use crate::service::CrudService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants", body = Vec<Restaurant>),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list_restaurants(&state.pool).await?;
    Ok(ok(rows))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant with its pizzas and prices", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found", body = ErrorBody),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    RestaurantId(id): RestaurantId,
) -> Result<impl IntoResponse, AppError> {
    let detail = CrudService::restaurant_detail(&state.pool, id).await?;
    Ok(ok(detail))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(("id" = i64, Path, description = "Restaurant id")),
    responses(
        (status = 204, description = "Restaurant and its restaurant pizzas deleted"),
        (status = 404, description = "Restaurant not found", body = ErrorBody),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    RestaurantId(id): RestaurantId,
) -> Result<impl IntoResponse, AppError> {
    let removed = CrudService::delete_restaurant(&state.pool, id).await?;
    tracing::info!(id, removed, "restaurant deleted");
    Ok(StatusCode::NO_CONTENT)
}
