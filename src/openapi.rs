//! OpenAPI document for the data API.

use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

use crate::handlers::{self, CreateRestaurantPizza};
use crate::models::{Pizza, Restaurant};
use crate::response::{
    ErrorBody, ErrorsBody, RestaurantDetail, RestaurantPizzaCreated, RestaurantPizzaEntry,
};

pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_restaurants,
        handlers::get_restaurant,
        handlers::delete_restaurant,
        handlers::list_pizzas,
        handlers::create_restaurant_pizza,
    ),
    components(
        schemas(
            Restaurant,
            Pizza,
            RestaurantDetail,
            RestaurantPizzaEntry,
            RestaurantPizzaCreated,
            CreateRestaurantPizza,
            ErrorBody,
            ErrorsBody
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurants and their pizzas"),
        (name = "pizzas", description = "Pizza catalogue"),
        (name = "restaurant_pizzas", description = "Which restaurant sells which pizza, and for how much")
    ),
    info(
        title = "Pizza API",
        description = "Restaurants, pizzas and restaurant pizza prices"
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn openapi_routes() -> Router {
    Router::new().route(OPENAPI_PATH, get(openapi_json))
}
