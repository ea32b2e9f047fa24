//! Queries and mutations against the three tables.
//!
//! Lookups take an explicit `&mut SqliteConnection` so the same code runs on a
//! pooled connection or inside a transaction. Mutations open one write
//! transaction and commit only after every step succeeded; an early return
//! drops it, which rolls it back.

use crate::error::{AppError, ValidationFailure};
use crate::models::{
    NewRestaurantPizza, Pizza, Restaurant, RestaurantPizza, RestaurantPizzaWithPizza,
};
use crate::response::{RestaurantDetail, RestaurantPizzaCreated};
use crate::service::RequestValidator;
use serde_json::Value;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

/// Takes the write lock before the existence reads; a second writer waits out
/// the busy timeout instead of failing on lock upgrade.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

const SELECT_RESTAURANTS: &str = "SELECT id, name, address FROM restaurants ORDER BY id";
const SELECT_RESTAURANT: &str = "SELECT id, name, address FROM restaurants WHERE id = ?";
const SELECT_PIZZAS: &str = "SELECT id, name, ingredients FROM pizzas ORDER BY id";
const SELECT_PIZZA: &str = "SELECT id, name, ingredients FROM pizzas WHERE id = ?";
const SELECT_RESTAURANT_PIZZAS: &str = r#"
    SELECT rp.id, rp.restaurant_id, rp.pizza_id, rp.price,
           p.name AS pizza_name, p.ingredients AS pizza_ingredients
    FROM restaurant_pizzas rp
    JOIN pizzas p ON p.id = rp.pizza_id
    WHERE rp.restaurant_id = ?
    ORDER BY rp.id
"#;
const DELETE_RESTAURANT_PIZZAS: &str = "DELETE FROM restaurant_pizzas WHERE restaurant_id = ?";
const DELETE_RESTAURANT: &str = "DELETE FROM restaurants WHERE id = ?";
const INSERT_RESTAURANT: &str = "INSERT INTO restaurants (name, address) VALUES (?, ?)";
const INSERT_PIZZA: &str = "INSERT INTO pizzas (name, ingredients) VALUES (?, ?)";
const INSERT_RESTAURANT_PIZZA: &str =
    "INSERT INTO restaurant_pizzas (restaurant_id, pizza_id, price) VALUES (?, ?, ?)";

pub struct CrudService;

impl CrudService {
    /// Open a transaction that already holds the database write lock.
    pub async fn begin_write(pool: &SqlitePool) -> Result<Transaction<'static, Sqlite>, AppError> {
        let tx = pool.begin_with(BEGIN_WRITE).await?;
        Ok(tx)
    }

    pub async fn list_restaurants(pool: &SqlitePool) -> Result<Vec<Restaurant>, AppError> {
        tracing::debug!(sql = SELECT_RESTAURANTS, "query");
        let rows = sqlx::query_as::<_, Restaurant>(SELECT_RESTAURANTS)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_pizzas(pool: &SqlitePool) -> Result<Vec<Pizza>, AppError> {
        tracing::debug!(sql = SELECT_PIZZAS, "query");
        let rows = sqlx::query_as::<_, Pizza>(SELECT_PIZZAS).fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn find_restaurant(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Restaurant>, AppError> {
        tracing::debug!(sql = SELECT_RESTAURANT, id, "query");
        let row = sqlx::query_as::<_, Restaurant>(SELECT_RESTAURANT)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    pub async fn find_pizza(
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Pizza>, AppError> {
        tracing::debug!(sql = SELECT_PIZZA, id, "query");
        let row = sqlx::query_as::<_, Pizza>(SELECT_PIZZA)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// Associations of one restaurant joined with their pizzas, in insertion order.
    pub async fn restaurant_pizzas_of(
        conn: &mut SqliteConnection,
        restaurant_id: i64,
    ) -> Result<Vec<RestaurantPizzaWithPizza>, AppError> {
        tracing::debug!(sql = SELECT_RESTAURANT_PIZZAS, restaurant_id, "query");
        let rows = sqlx::query_as::<_, RestaurantPizzaWithPizza>(SELECT_RESTAURANT_PIZZAS)
            .bind(restaurant_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    /// Restaurant with its nested associations, or `NotFound`.
    pub async fn restaurant_detail(
        pool: &SqlitePool,
        id: i64,
    ) -> Result<RestaurantDetail, AppError> {
        let mut conn = pool.acquire().await?;
        let restaurant = Self::find_restaurant(&mut conn, id)
            .await?
            .ok_or_else(AppError::restaurant_not_found)?;
        let rows = Self::restaurant_pizzas_of(&mut conn, id).await?;
        Ok(RestaurantDetail::new(restaurant, rows))
    }

    /// Delete a restaurant and every association that points at it.
    /// Returns the number of associations removed.
    pub async fn delete_restaurant(pool: &SqlitePool, id: i64) -> Result<u64, AppError> {
        let mut tx = Self::begin_write(pool).await?;
        if Self::find_restaurant(&mut tx, id).await?.is_none() {
            return Err(AppError::restaurant_not_found());
        }
        tracing::debug!(sql = DELETE_RESTAURANT_PIZZAS, id, "query (tx)");
        let removed = sqlx::query(DELETE_RESTAURANT_PIZZAS)
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tracing::debug!(sql = DELETE_RESTAURANT, id, "query (tx)");
        sqlx::query(DELETE_RESTAURANT).bind(id).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(removed)
    }

    /// Validate `body` as a whole, then insert exactly one association.
    ///
    /// Every check runs even after one has failed so the rejection covers the
    /// full batch; on any failure nothing is written.
    pub async fn create_restaurant_pizza(
        pool: &SqlitePool,
        body: &Value,
    ) -> Result<RestaurantPizzaCreated, AppError> {
        let request =
            RequestValidator::restaurant_pizza(body).map_err(|f| AppError::Validation(vec![f]))?;

        let mut tx = Self::begin_write(pool).await?;
        let mut failures = Vec::new();

        let price = match request.price {
            Ok(price) => Some(price),
            Err(failure) => {
                failures.push(failure);
                None
            }
        };
        let pizza = match request.pizza_id {
            Some(id) => Self::find_pizza(&mut tx, id).await?,
            None => None,
        };
        if pizza.is_none() {
            failures.push(ValidationFailure::UnknownPizza);
        }
        let restaurant = match request.restaurant_id {
            Some(id) => Self::find_restaurant(&mut tx, id).await?,
            None => None,
        };
        if restaurant.is_none() {
            failures.push(ValidationFailure::UnknownRestaurant);
        }

        let (Some(price), Some(pizza), Some(restaurant)) = (price, pizza, restaurant) else {
            return Err(AppError::Validation(failures));
        };

        let new = NewRestaurantPizza {
            restaurant_id: restaurant.id,
            pizza_id: pizza.id,
            price,
        };
        let created = Self::insert_restaurant_pizza(&mut tx, &new).await?;
        tx.commit().await?;
        tracing::info!(
            id = created.id,
            restaurant_id = created.restaurant_id,
            pizza_id = created.pizza_id,
            "restaurant pizza created"
        );

        Ok(RestaurantPizzaCreated {
            id: created.id,
            pizza,
            pizza_id: created.pizza_id,
            price: created.price,
            restaurant,
            restaurant_id: created.restaurant_id,
        })
    }

    /// Insert an association whose price has already been checked. Constraint
    /// rejections from the database surface as validation failures.
    pub async fn insert_restaurant_pizza(
        conn: &mut SqliteConnection,
        new: &NewRestaurantPizza,
    ) -> Result<RestaurantPizza, AppError> {
        tracing::debug!(sql = INSERT_RESTAURANT_PIZZA, ?new, "query");
        let result = sqlx::query(INSERT_RESTAURANT_PIZZA)
            .bind(new.restaurant_id)
            .bind(new.pizza_id)
            .bind(new.price.get())
            .execute(&mut *conn)
            .await
            .map_err(AppError::from_insert)?;
        Ok(RestaurantPizza {
            id: result.last_insert_rowid(),
            restaurant_id: new.restaurant_id,
            pizza_id: new.pizza_id,
            price: new.price.get(),
        })
    }

    pub async fn insert_restaurant(
        conn: &mut SqliteConnection,
        name: &str,
        address: &str,
    ) -> Result<Restaurant, AppError> {
        tracing::debug!(sql = INSERT_RESTAURANT, name, "query");
        let result = sqlx::query(INSERT_RESTAURANT)
            .bind(name)
            .bind(address)
            .execute(&mut *conn)
            .await?;
        Ok(Restaurant {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            address: address.to_string(),
        })
    }

    pub async fn insert_pizza(
        conn: &mut SqliteConnection,
        name: &str,
        ingredients: &str,
    ) -> Result<Pizza, AppError> {
        tracing::debug!(sql = INSERT_PIZZA, name, "query");
        let result = sqlx::query(INSERT_PIZZA)
            .bind(name)
            .bind(ingredients)
            .execute(&mut *conn)
            .await?;
        Ok(Pizza {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            ingredients: ingredients.to_string(),
        })
    }
}
