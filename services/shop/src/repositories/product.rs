//! Product repository for database operations

use common::{
    collection::{Collection, Filter},
    database::Database,
    error::DatabaseResult,
};
use tracing::info;
use uuid::Uuid;

use crate::models::{Product, ProductInput};

pub const COLLECTION: &str = "products";

/// Product repository
#[derive(Clone)]
pub struct ProductRepository {
    collection: Collection,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(database: &Database) -> DatabaseResult<Self> {
        Ok(Self {
            collection: database.collection(COLLECTION)?,
        })
    }

    /// Get all products
    pub async fn get_all(&self) -> DatabaseResult<Vec<Product>> {
        self.collection.find_many(&Filter::All).await
    }

    /// Find a product by ID
    pub async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Product>> {
        self.collection.find_one(&Filter::Id(id)).await
    }

    /// Store a new product
    pub async fn create(&self, product: &Product) -> DatabaseResult<()> {
        info!("Creating product: {}", product.id);
        self.collection.insert_one(product.id, product).await
    }

    /// Overwrite name, description and price of a product
    pub async fn update(&self, id: Uuid, fields: &ProductInput) -> DatabaseResult<Option<Product>> {
        info!("Updating product: {}", id);
        self.collection.update_one(&Filter::Id(id), fields).await
    }

    /// Delete a product, returning whether it existed
    pub async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting product: {}", id);
        Ok(self.collection.delete_one(&Filter::Id(id)).await? > 0)
    }
}
