//! Knowledge-base records and request payloads

pub mod import;
pub mod note;

pub use import::{FileType, Import, ImportUpload};
pub use note::{Note, NoteInput, NoteUpdate, SaveFileRequest, SearchQuery};
