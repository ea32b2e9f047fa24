//! Demo rows for a fresh database.

use crate::error::AppError;
use crate::models::NewRestaurantPizza;
use crate::service::CrudService;
use sqlx::SqlitePool;

const RESTAURANTS: &[(&str, &str)] = &[
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: &[(&str, &str)] = &[
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (restaurant index, pizza index, price) into the tables above.
const PRICES: &[(usize, usize, i64)] = &[(0, 0, 1), (1, 1, 4), (2, 2, 5)];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Insert the demo rows in one transaction, but only when there are no
/// restaurants and no pizzas yet. Returns what was inserted.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<SeedSummary, AppError> {
    let mut tx = CrudService::begin_write(pool).await?;
    let (existing,): (i64,) =
        sqlx::query_as("SELECT (SELECT COUNT(*) FROM restaurants) + (SELECT COUNT(*) FROM pizzas)")
            .fetch_one(&mut *tx)
            .await?;
    if existing > 0 {
        tracing::info!(existing, "database already has data, skipping seed");
        return Ok(SeedSummary::default());
    }

    let mut restaurants = Vec::with_capacity(RESTAURANTS.len());
    for (name, address) in RESTAURANTS {
        restaurants.push(CrudService::insert_restaurant(&mut tx, name, address).await?);
    }
    let mut pizzas = Vec::with_capacity(PIZZAS.len());
    for (name, ingredients) in PIZZAS {
        pizzas.push(CrudService::insert_pizza(&mut tx, name, ingredients).await?);
    }
    for &(r, p, price) in PRICES {
        let new = NewRestaurantPizza::new(restaurants[r].id, pizzas[p].id, price)?;
        CrudService::insert_restaurant_pizza(&mut tx, &new).await?;
    }
    tx.commit().await?;

    let summary = SeedSummary {
        restaurants: restaurants.len(),
        pizzas: pizzas.len(),
        restaurant_pizzas: PRICES.len(),
    };
    tracing::info!(?summary, "seeded demo data");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::apply_migrations;
    use crate::store::connect_in_memory;

    #[tokio::test]
    async fn seeds_once() {
        let pool = connect_in_memory().await.unwrap();
        apply_migrations(&pool).await.unwrap();

        let first = seed_demo_data(&pool).await.unwrap();
        assert_eq!(
            first,
            SeedSummary {
                restaurants: 3,
                pizzas: 3,
                restaurant_pizzas: 3
            }
        );
        assert_eq!(seed_demo_data(&pool).await.unwrap(), SeedSummary::default());
        assert_eq!(CrudService::list_restaurants(&pool).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn seeded_restaurants_have_prices() {
        let pool = connect_in_memory().await.unwrap();
        apply_migrations(&pool).await.unwrap();
        seed_demo_data(&pool).await.unwrap();

        let detail = CrudService::restaurant_detail(&pool, 2).await.unwrap();
        assert_eq!(detail.name, "Sanjay's Pizza");
        assert_eq!(detail.restaurant_pizzas.len(), 1);
        assert_eq!(detail.restaurant_pizzas[0].pizza.name, "Geri");
        assert_eq!(detail.restaurant_pizzas[0].price, 4);
    }
}
