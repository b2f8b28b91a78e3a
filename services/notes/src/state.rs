//! Application state shared across handlers

use std::path::PathBuf;

use common::{config::DEFAULT_MAX_UPLOAD_BYTES, database::Database, error::DatabaseResult};

use crate::repositories::{ImportRepository, NoteRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub database: Database,
    pub note_repository: NoteRepository,
    pub import_repository: ImportRepository,
    /// Directory receiving exported imports
    pub export_dir: PathBuf,
    /// Body limit applied to file uploads
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(database: Database, export_dir: impl Into<PathBuf>) -> DatabaseResult<Self> {
        Ok(Self {
            note_repository: NoteRepository::new(&database)?,
            import_repository: ImportRepository::new(&database)?,
            export_dir: export_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            database,
        })
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
