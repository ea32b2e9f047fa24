//! Entities stored in the three tables, plus the validated `Price` value.

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::ModelError;

pub const MIN_PRICE: i64 = 1;
pub const MAX_PRICE: i64 = 30;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Pizza {
    pub id: i64,
    pub name: String,
    pub ingredients: String,
}

/// "This restaurant offers this pizza at this price."
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RestaurantPizza {
    pub id: i64,
    pub restaurant_id: i64,
    pub pizza_id: i64,
    pub price: i64,
}

/// A price that has passed the range check. The only way to build one is [`Price::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub fn new(value: i64) -> Result<Self, ModelError> {
        validate_price(value)?;
        Ok(Price(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

pub fn validate_price(value: i64) -> Result<(), ModelError> {
    if (MIN_PRICE..=MAX_PRICE).contains(&value) {
        Ok(())
    } else {
        Err(ModelError::PriceOutOfRange(value))
    }
}

/// Insert payload for `restaurant_pizzas`. Holding a [`Price`] means the range check already ran.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewRestaurantPizza {
    pub restaurant_id: i64,
    pub pizza_id: i64,
    pub price: Price,
}

impl NewRestaurantPizza {
    pub fn new(restaurant_id: i64, pizza_id: i64, price: i64) -> Result<Self, ModelError> {
        Ok(Self {
            restaurant_id,
            pizza_id,
            price: Price::new(price)?,
        })
    }
}

/// Join of an association row with its pizza, as loaded for a restaurant detail.
#[derive(Debug, sqlx::FromRow)]
pub struct RestaurantPizzaWithPizza {
    pub id: i64,
    pub restaurant_id: i64,
    pub pizza_id: i64,
    pub price: i64,
    pub pizza_name: String,
    pub pizza_ingredients: String,
}

impl RestaurantPizzaWithPizza {
    pub fn pizza(&self) -> Pizza {
        Pizza {
            id: self.pizza_id,
            name: self.pizza_name.clone(),
            ingredients: self.pizza_ingredients.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_price_in_range_is_accepted() {
        for p in MIN_PRICE..=MAX_PRICE {
            assert_eq!(Price::new(p).map(Price::get), Ok(p));
        }
    }

    #[test]
    fn prices_outside_range_are_rejected() {
        for p in [i64::MIN, -1, 0, 31, 50, i64::MAX] {
            assert_eq!(Price::new(p), Err(ModelError::PriceOutOfRange(p)));
        }
    }

    #[test]
    fn new_restaurant_pizza_checks_price_before_construction() {
        assert!(NewRestaurantPizza::new(1, 1, 0).is_err());
        let ok = NewRestaurantPizza::new(1, 2, 12).unwrap();
        assert_eq!(ok.price.get(), 12);
        assert_eq!(ok.pizza_id, 2);
    }

    #[test]
    fn price_serializes_as_plain_integer() {
        let price = Price::new(7).unwrap();
        assert_eq!(serde_json::to_value(price).unwrap(), serde_json::json!(7));
    }
}
