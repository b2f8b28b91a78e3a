//! Note repository for database operations

use common::{
    collection::{Collection, Filter},
    database::Database,
    error::DatabaseResult,
};
use tracing::info;
use uuid::Uuid;

use crate::models::{Note, NoteUpdate};

pub const COLLECTION: &str = "notes";

/// Fields matched by free-text search
const SEARCH_FIELDS: &[&str] = &["title", "content", "tags"];

/// Note repository
#[derive(Clone)]
pub struct NoteRepository {
    collection: Collection,
}

impl NoteRepository {
    /// Create a new note repository
    pub fn new(database: &Database) -> DatabaseResult<Self> {
        Ok(Self {
            collection: database.collection(COLLECTION)?,
        })
    }

    /// Get all notes
    pub async fn get_all(&self) -> DatabaseResult<Vec<Note>> {
        self.collection.find_many(&Filter::All).await
    }

    /// Find a note by ID
    pub async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Note>> {
        self.collection.find_one(&Filter::Id(id)).await
    }

    /// Store a new note
    pub async fn create(&self, note: &Note) -> DatabaseResult<()> {
        info!("Creating note: {}", note.id);
        self.collection.insert_one(note.id, note).await
    }

    /// Overwrite the fields of a note, returning the stored result
    pub async fn update(&self, id: Uuid, fields: &NoteUpdate) -> DatabaseResult<Option<Note>> {
        info!("Updating note: {}", id);
        self.collection.update_one(&Filter::Id(id), fields).await
    }

    /// Delete a note, returning whether it existed
    pub async fn delete(&self, id: Uuid) -> DatabaseResult<bool> {
        info!("Deleting note: {}", id);
        Ok(self.collection.delete_one(&Filter::Id(id)).await? > 0)
    }

    /// Notes whose title, content or any tag contains `query`, ignoring case
    pub async fn search(&self, query: &str) -> DatabaseResult<Vec<Note>> {
        self.collection
            .find_many(&Filter::any_field_contains(SEARCH_FIELDS, query))
            .await
    }
}
