//! Shape checks for the restaurant pizza request body. Reference checks need
//! the database and happen in [`super::CrudService::create_restaurant_pizza`].

use crate::error::ValidationFailure;
use crate::models::Price;
use serde_json::{Map, Value};

/// Fields pulled out of a create body. References are only type-checked here.
#[derive(Debug, PartialEq, Eq)]
pub struct RestaurantPizzaRequest {
    pub price: Result<Price, ValidationFailure>,
    pub pizza_id: Option<i64>,
    pub restaurant_id: Option<i64>,
}

pub struct RequestValidator;

impl RequestValidator {
    pub fn restaurant_pizza(body: &Value) -> Result<RestaurantPizzaRequest, ValidationFailure> {
        let body = body.as_object().ok_or(ValidationFailure::NotAnObject)?;
        Ok(RestaurantPizzaRequest {
            price: Self::price(body),
            pizza_id: Self::reference(body, "pizza_id"),
            restaurant_id: Self::reference(body, "restaurant_id"),
        })
    }

    /// Only JSON integers count: `10.0`, `"10"`, `true` and `null` are all rejected.
    pub fn price(body: &Map<String, Value>) -> Result<Price, ValidationFailure> {
        let value = match body.get("price") {
            None | Some(Value::Null) => return Err(ValidationFailure::MissingPrice),
            Some(v) => v,
        };
        let n = match value {
            Value::Number(n) => n,
            _ => return Err(ValidationFailure::PriceNotInteger),
        };
        let raw = if let Some(i) = n.as_i64() {
            i
        } else if n.is_u64() {
            i64::MAX
        } else {
            return Err(ValidationFailure::PriceNotInteger);
        };
        Ok(Price::new(raw)?)
    }

    fn reference(body: &Map<String, Value>, key: &str) -> Option<i64> {
        body.get(key).and_then(Value::as_i64)
    }
}
