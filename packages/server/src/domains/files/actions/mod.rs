//! Files domain actions

mod access;
mod upload;

pub use access::{create_signed_url, delete_file, list_files};
pub use upload::upload_file;

use crate::common::{ApiError, ApiResult};

use super::data::FileKind;

/// Seconds a signed URL stays valid
pub const SIGNED_URL_TTL_SECS: u64 = 3600;

pub(crate) fn parse_kind(file_type: &str) -> ApiResult<FileKind> {
    file_type
        .parse()
        .map_err(|_| ApiError::unprocessable("file_type must be one of: script, poster, concept_art"))
}
