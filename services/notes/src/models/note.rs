//! Note model and payload validation

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted title, in characters
pub const MAX_TITLE_LENGTH: usize = 100;

/// Note record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: String,
    pub formatted_date: String,
}

/// Note fields accepted on create and update
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub formatted_date: String,
}

/// Field set written by an update. `formatted_date` is always refreshed;
/// `created_at` is only replaced when the client sends one.
#[derive(Debug, Clone, Serialize)]
pub struct NoteUpdate {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    pub formatted_date: String,
}

/// Body of `POST /notes/search`
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchQuery {
    pub query: String,
}

/// Body of `POST /notes/save-file/{id}`
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SaveFileRequest {
    pub file_name: String,
    pub file_path: String,
}

/// Human readable date, e.g. `January 2, 2006`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

impl NoteInput {
    /// Check the required fields
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Title is required".to_string());
        }

        if self.content.is_empty() {
            return Err("Content is required".to_string());
        }

        if self.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(format!(
                "Title cannot exceed {MAX_TITLE_LENGTH} characters"
            ));
        }

        Ok(())
    }

    /// Field set for overwriting a stored note
    pub fn into_update(self, now: DateTime<Utc>) -> NoteUpdate {
        NoteUpdate {
            title: self.title,
            content: self.content,
            tags: self.tags,
            created_at: Some(self.created_at).filter(|c| !c.is_empty()),
            formatted_date: format_date(now),
        }
    }
}

impl Note {
    /// Build a new note with a server-assigned identifier, filling in
    /// missing timestamps from `now`
    pub fn new(input: NoteInput, now: DateTime<Utc>) -> Self {
        let created_at = if input.created_at.is_empty() {
            now.to_rfc3339_opts(SecondsFormat::Secs, true)
        } else {
            input.created_at
        };
        let formatted_date = if input.formatted_date.is_empty() {
            format_date(now)
        } else {
            input.formatted_date
        };

        Self {
            id: Uuid::new_v4(),
            title: input.title,
            content: input.content,
            tags: input.tags,
            created_at,
            formatted_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input(title: &str, content: &str) -> NoteInput {
        NoteInput {
            title: title.to_string(),
            content: content.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_required_fields() {
        assert_eq!(input("", "body").validate(), Err("Title is required".to_string()));
        assert_eq!(input("t", "").validate(), Err("Content is required".to_string()));
        assert!(input("t", "body").validate().is_ok());
    }

    #[test]
    fn test_validate_title_length_counts_characters() {
        assert!(input(&"a".repeat(100), "body").validate().is_ok());
        assert_eq!(
            input(&"a".repeat(101), "body").validate(),
            Err("Title cannot exceed 100 characters".to_string())
        );
        // 100 multi-byte characters are still within the limit
        assert!(input(&"é".repeat(100), "body").validate().is_ok());
    }

    #[test]
    fn test_new_note_fills_timestamps() {
        let now = Utc.with_ymd_and_hms(2006, 1, 2, 15, 4, 5).unwrap();
        let note = Note::new(input("t", "c"), now);
        assert_eq!(note.created_at, "2006-01-02T15:04:05Z");
        assert_eq!(note.formatted_date, "January 2, 2006");

        let mut supplied = input("t", "c");
        supplied.created_at = "yesterday".to_string();
        supplied.formatted_date = "some day".to_string();
        let note = Note::new(supplied, now);
        assert_eq!(note.created_at, "yesterday");
        assert_eq!(note.formatted_date, "some day");
    }

    #[test]
    fn test_update_keeps_created_at_unless_sent() {
        let now = Utc.with_ymd_and_hms(2024, 12, 25, 0, 0, 0).unwrap();
        let update = input("t", "c").into_update(now);
        assert_eq!(update.created_at, None);
        assert_eq!(update.formatted_date, "December 25, 2024");

        let fields = serde_json::to_value(&update).unwrap();
        assert!(fields.get("created_at").is_none());
    }
}
