//! Upload checks on file name and size.

use std::path::Path;

use crate::common::{ApiError, ApiResult};

use super::data::FileKind;

/// Lower-cased extension with its dot, or "" when there is none.
pub fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// Check extension against the kind's allow-list and size against `max_bytes`.
///
/// Returns the normalized extension.
pub fn validate_file(
    kind: FileKind,
    file_name: &str,
    size: usize,
    max_bytes: usize,
) -> ApiResult<String> {
    let ext = file_extension(file_name);
    let allowed = kind.allowed_extensions();
    if !allowed.contains(&ext.as_str()) {
        return Err(ApiError::bad_request(format!(
            "File type {} not allowed. Allowed types: {}",
            ext,
            allowed.join(", ")
        )));
    }

    if size > max_bytes {
        return Err(ApiError::bad_request(format!(
            "File size {:.2}MB exceeds maximum of {}MB",
            size as f64 / 1024.0 / 1024.0,
            max_bytes / (1024 * 1024)
        )));
    }

    Ok(ext)
}

/// MIME type for a stored object, from its extension
pub fn content_type_for(ext: &str) -> String {
    mime_guess::from_ext(ext.trim_start_matches('.'))
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
