//! Files domain - listing scripts, posters and concept art in object storage
//!
//! Objects live at `{creator_id}/{listing_id}/{file_type}{ext}`; the listing
//! row keeps their public URLs and storage paths are recovered from them.

pub mod actions;
pub mod data;
pub mod validation;

pub use data::{FileKind, FileUploadResponse, SignedUrlResponse, UploadFile};
