//! Order repository for database operations

use common::{
    collection::{Collection, Filter},
    database::Database,
    error::DatabaseResult,
};
use tracing::info;
use uuid::Uuid;

use crate::models::Order;

pub const COLLECTION: &str = "orders";

/// Order repository
#[derive(Clone)]
pub struct OrderRepository {
    collection: Collection,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(database: &Database) -> DatabaseResult<Self> {
        Ok(Self {
            collection: database.collection(COLLECTION)?,
        })
    }

    /// Get all orders
    pub async fn get_all(&self) -> DatabaseResult<Vec<Order>> {
        self.collection.find_many(&Filter::All).await
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Order>> {
        self.collection.find_one(&Filter::Id(id)).await
    }

    /// Store a new order
    pub async fn place(&self, order: &Order) -> DatabaseResult<()> {
        info!("Placing order {} for user {}", order.id, order.user_id);
        self.collection.insert_one(order.id, order).await
    }

    /// Delete an order, returning whether it existed
    pub async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting order: {}", id);
        Ok(self.collection.delete_one(&Filter::Id(id)).await? > 0)
    }
}
