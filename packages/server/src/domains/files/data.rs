use serde::{Deserialize, Serialize};

use crate::common::ListingId;

/// Kinds of listing file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Script,
    Poster,
    ConceptArt,
}

impl FileKind {
    /// Extensions accepted for this kind (lower-case, with dot)
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            FileKind::Script => &[".pdf"],
            FileKind::Poster | FileKind::ConceptArt => &[".jpg", ".jpeg", ".png", ".webp"],
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileKind::Script => write!(f, "script"),
            FileKind::Poster => write!(f, "poster"),
            FileKind::ConceptArt => write!(f, "concept_art"),
        }
    }
}

impl std::str::FromStr for FileKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "script" => Ok(FileKind::Script),
            "poster" => Ok(FileKind::Poster),
            "concept_art" => Ok(FileKind::ConceptArt),
            _ => Err(anyhow::anyhow!("Invalid file type: {}", s)),
        }
    }
}

/// A file received from a multipart upload
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub listing_id: ListingId,
    pub file_type: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUploadResponse {
    pub path: String,
    pub url: String,
    pub signed_url: String,
    pub file_name: String,
    #[serde(rename = "type")]
    pub file_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUrlResponse {
    pub signed_url: String,
    pub expires_in: u64,
}

/// Body naming which file of a listing an operation targets
#[derive(Debug, Clone, Deserialize)]
pub struct FileTypeRequest {
    pub file_type: String,
}
