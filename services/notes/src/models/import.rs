//! Import model
//!
//! An import is an uploaded file stored with its raw bytes. The payload is
//! base64 encoded in JSON.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of file inferred from the uploaded file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Video,
    Unknown,
}

impl FileType {
    /// Infer the kind from the file extension, ignoring case
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("jpg" | "jpeg" | "png" | "gif") => FileType::Image,
            Some("mp4" | "avi") => FileType::Video,
            _ => FileType::Unknown,
        }
    }
}

/// Import record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Import {
    pub id: Uuid,
    pub file_name: String,
    pub location: String,
    pub tags: String,
    pub file_type: FileType,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields collected from a multipart upload
#[derive(Debug, Clone, Default)]
pub struct ImportUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub tags: String,
    pub location: String,
    pub resolution: Option<String>,
    pub duration: Option<String>,
}

impl Import {
    /// Build a new import with a server-assigned identifier. Resolution is
    /// kept for images only and duration for videos only.
    pub fn new(upload: ImportUpload, now: DateTime<Utc>) -> Self {
        let file_type = FileType::from_file_name(&upload.file_name);
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        Self {
            id: Uuid::new_v4(),
            file_type,
            resolution: non_empty(upload.resolution).filter(|_| file_type == FileType::Image),
            duration: non_empty(upload.duration).filter(|_| file_type == FileType::Video),
            file_name: upload.file_name,
            location: upload.location,
            tags: upload.tags,
            data: upload.data,
            created_at: now,
        }
    }
}

mod base64_bytes {
    use base64::{Engine as _, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_type_from_extension() {
        assert_eq!(FileType::from_file_name("photo.jpg"), FileType::Image);
        assert_eq!(FileType::from_file_name("PHOTO.PNG"), FileType::Image);
        assert_eq!(FileType::from_file_name("anim.gif"), FileType::Image);
        assert_eq!(FileType::from_file_name("clip.mp4"), FileType::Video);
        assert_eq!(FileType::from_file_name("clip.avi"), FileType::Video);
        assert_eq!(FileType::from_file_name("notes.txt"), FileType::Unknown);
        assert_eq!(FileType::from_file_name("README"), FileType::Unknown);
    }

    #[test]
    fn test_new_import_keeps_metadata_for_matching_kind() {
        let upload = ImportUpload {
            file_name: "photo.jpg".to_string(),
            data: vec![1, 2, 3],
            resolution: Some("1920x1080".to_string()),
            duration: Some("3:00".to_string()),
            ..Default::default()
        };
        let import = Import::new(upload, Utc::now());
        assert_eq!(import.file_type, FileType::Image);
        assert_eq!(import.resolution.as_deref(), Some("1920x1080"));
        assert_eq!(import.duration, None);
    }

    #[test]
    fn test_payload_is_base64_in_json() {
        let upload = ImportUpload {
            file_name: "a.bin".to_string(),
            data: b"hello".to_vec(),
            ..Default::default()
        };
        let import = Import::new(upload, Utc::now());
        let json = serde_json::to_value(&import).unwrap();
        assert_eq!(json["data"], "aGVsbG8=");
        assert_eq!(json["file_type"], "unknown");
        assert!(json.get("resolution").is_none());

        let decoded: Import = serde_json::from_value(json).unwrap();
        assert_eq!(decoded.data, b"hello");
    }
}
