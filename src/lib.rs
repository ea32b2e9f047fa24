//! Pizza API: restaurants, pizzas and the prices restaurants charge for them, over JSON REST.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod seed;
pub mod service;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, ModelError, ValidationFailure};
pub use migration::apply_migrations;
pub use models::{NewRestaurantPizza, Pizza, Price, Restaurant, RestaurantPizza};
pub use routes::{api_routes, common_routes};
pub use seed::seed_demo_data;
pub use service::CrudService;
pub use state::AppState;
pub use store::{connect, connect_in_memory};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router with request tracing and a body size limit.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .merge(openapi::openapi_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit)),
        )
}
