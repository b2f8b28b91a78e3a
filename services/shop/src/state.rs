//! Application state shared across handlers

use common::{database::Database, error::DatabaseResult};

use crate::repositories::{CartRepository, OrderRepository, ProductRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub product_repository: ProductRepository,
    pub cart_repository: CartRepository,
    pub order_repository: OrderRepository,
}

impl AppState {
    pub fn new(database: Database) -> DatabaseResult<Self> {
        Ok(Self {
            product_repository: ProductRepository::new(&database)?,
            cart_repository: CartRepository::new(&database)?,
            order_repository: OrderRepository::new(&database)?,
            database,
        })
    }
}
