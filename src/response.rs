//! Response shapes and status helpers.
//!
//! Nested objects are flat copies: a pizza embedded in an association never
//! carries its own associations, so serialization cannot recurse.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Pizza, Restaurant, RestaurantPizzaWithPizza};

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantDetail {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizzaEntry>,
}

impl RestaurantDetail {
    pub fn new(restaurant: Restaurant, rows: Vec<RestaurantPizzaWithPizza>) -> Self {
        Self {
            id: restaurant.id,
            name: restaurant.name,
            address: restaurant.address,
            restaurant_pizzas: rows.into_iter().map(RestaurantPizzaEntry::from).collect(),
        }
    }
}

/// An association as listed under a restaurant.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaEntry {
    pub id: i64,
    pub pizza: Pizza,
    pub pizza_id: i64,
    pub price: i64,
    pub restaurant_id: i64,
}

impl From<RestaurantPizzaWithPizza> for RestaurantPizzaEntry {
    fn from(row: RestaurantPizzaWithPizza) -> Self {
        Self {
            pizza: row.pizza(),
            id: row.id,
            pizza_id: row.pizza_id,
            price: row.price,
            restaurant_id: row.restaurant_id,
        }
    }
}

/// Body returned by a successful create: both parents are embedded.
#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantPizzaCreated {
    pub id: i64,
    pub pizza: Pizza,
    pub pizza_id: i64,
    pub price: i64,
    pub restaurant: Restaurant,
    pub restaurant_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorsBody {
    pub errors: Vec<String>,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(data))
}
