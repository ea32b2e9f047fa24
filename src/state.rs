//! Shared application state handed to every handler.

use sqlx::SqlitePool;

/// The pool is the only state shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}
