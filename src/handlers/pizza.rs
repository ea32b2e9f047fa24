use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::AppError;
use crate::models::Pizza;
use crate::response::ok;
use crate::service::CrudService;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "All pizzas", body = Vec<Pizza>),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = CrudService::list_pizzas(&state.pool).await?;
    Ok(ok(rows))
}
