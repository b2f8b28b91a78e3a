//! Repositories for database operations

pub mod import;
pub mod note;

pub use import::ImportRepository;
pub use note::NoteRepository;

/// Collections owned by the notes service
pub const COLLECTIONS: [&str; 2] = [note::COLLECTION, import::COLLECTION];
