//! CrudService: data access for restaurants, pizzas and their associations.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::{RequestValidator, RestaurantPizzaRequest};
