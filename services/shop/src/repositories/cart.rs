//! Cart repository for database operations

use common::{
    collection::{Collection, Filter},
    database::Database,
    error::DatabaseResult,
};
use tracing::info;
use uuid::Uuid;

use crate::models::CartItem;

pub const COLLECTION: &str = "cart";

/// Cart repository
#[derive(Clone)]
pub struct CartRepository {
    collection: Collection,
}

impl CartRepository {
    pub fn new(database: &Database) -> DatabaseResult<Self> {
        Ok(Self {
            collection: database.collection(COLLECTION)?,
        })
    }

    pub async fn get_all(&self) -> DatabaseResult<Vec<CartItem>> {
        self.collection.find_many(&Filter::All).await
    }

    pub async fn add(&self, item: &CartItem) -> DatabaseResult<()> {
        info!("Adding product {} to cart as {}", item.product_id, item.id);
        self.collection.insert_one(item.id, item).await
    }

    pub async fn remove(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Removing cart item: {}", id);
        Ok(self.collection.delete_one(&Filter::Id(id)).await? > 0)
    }
}
