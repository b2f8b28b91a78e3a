//! Import repository for database operations

use common::{
    collection::{Collection, Filter},
    database::Database,
    error::DatabaseResult,
};
use tracing::info;
use uuid::Uuid;

use crate::models::Import;

pub const COLLECTION: &str = "imports";

/// Import repository
#[derive(Clone)]
pub struct ImportRepository {
    collection: Collection,
}

impl ImportRepository {
    pub fn new(database: &Database) -> DatabaseResult<Self> {
        Ok(Self {
            collection: database.collection(COLLECTION)?,
        })
    }

    pub async fn get_all(&self) -> DatabaseResult<Vec<Import>> {
        self.collection.find_many(&Filter::All).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Import>> {
        self.collection.find_one(&Filter::Id(id)).await
    }

    pub async fn create(&self, import: &Import) -> DatabaseResult<()> {
        info!(
            "Storing import {} ({}, {} bytes)",
            import.id,
            import.file_name,
            import.data.len()
        );
        self.collection.insert_one(import.id, import).await
    }

    pub async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting import: {}", id);
        Ok(self.collection.delete_one(&Filter::Id(id)).await? > 0)
    }
}
