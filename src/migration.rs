//! Bootstrap DDL for `restaurants`, `pizzas` and `restaurant_pizzas`.
//! Every statement is `IF NOT EXISTS`, so running it against an existing database is a no-op.

use crate::error::AppError;
use sqlx::SqlitePool;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        address TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS pizzas (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        ingredients TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS restaurant_pizzas (
        id INTEGER PRIMARY KEY,
        restaurant_id INTEGER NOT NULL
            CONSTRAINT fk_restaurant_pizzas_restaurant_id_restaurants
            REFERENCES restaurants (id) ON DELETE CASCADE,
        pizza_id INTEGER NOT NULL
            CONSTRAINT fk_restaurant_pizzas_pizza_id_pizzas
            REFERENCES pizzas (id) ON DELETE CASCADE,
        price INTEGER NOT NULL
            CONSTRAINT ck_restaurant_pizzas_price CHECK (price BETWEEN 1 AND 30)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS ix_restaurant_pizzas_restaurant_id ON restaurant_pizzas (restaurant_id)",
    "CREATE INDEX IF NOT EXISTS ix_restaurant_pizzas_pizza_id ON restaurant_pizzas (pizza_id)",
];

/// Create the three tables and their indexes.
pub async fn apply_migrations(pool: &SqlitePool) -> Result<(), AppError> {
    for sql in STATEMENTS {
        sqlx::query(sql).execute(pool).await?;
    }
    tracing::debug!(statements = STATEMENTS.len(), "schema applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::connect_in_memory;

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap();
        n
    }

    async fn setup() -> SqlitePool {
        let pool = connect_in_memory().await.unwrap();
        apply_migrations(&pool).await.unwrap();
        sqlx::query("INSERT INTO restaurants (id, name, address) VALUES (1, 'A', 'a')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO pizzas (id, name, ingredients) VALUES (1, 'P', 'p'), (2, 'Q', 'q')",
        )
        .execute(&pool)
        .await
        .unwrap();
        pool
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = setup().await;
        apply_migrations(&pool).await.unwrap();
        assert_eq!(count(&pool, "restaurants").await, 1);
    }

    #[tokio::test]
    async fn check_constraint_rejects_out_of_range_price() {
        let pool = setup().await;
        for price in [0, 31] {
            let res = sqlx::query(
                "INSERT INTO restaurant_pizzas (restaurant_id, pizza_id, price) VALUES (1, 1, ?)",
            )
            .bind(price)
            .execute(&pool)
            .await;
            let err = res.unwrap_err();
            let db = err.as_database_error().unwrap();
            assert!(db.is_check_violation(), "price {price}: {db}");
        }
        assert_eq!(count(&pool, "restaurant_pizzas").await, 0);
    }

    #[tokio::test]
    async fn foreign_keys_reject_unknown_parents() {
        let pool = setup().await;
        let res = sqlx::query(
            "INSERT INTO restaurant_pizzas (restaurant_id, pizza_id, price) VALUES (1, 99, 10)",
        )
        .execute(&pool)
        .await;
        assert!(res.unwrap_err().as_database_error().unwrap().is_foreign_key_violation());
    }

    #[tokio::test]
    async fn deleting_a_pizza_cascades_to_its_associations() {
        let pool = setup().await;
        sqlx::query(
            "INSERT INTO restaurant_pizzas (restaurant_id, pizza_id, price) VALUES (1, 1, 10), (1, 2, 11)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("DELETE FROM pizzas WHERE id = 1")
            .execute(&pool)
            .await
            .unwrap();
        let (left,): (i64,) = sqlx::query_as("SELECT pizza_id FROM restaurant_pizzas")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(left, 2);
        assert_eq!(count(&pool, "restaurant_pizzas").await, 1);
    }
}
