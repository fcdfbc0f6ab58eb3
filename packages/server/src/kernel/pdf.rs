//! PDF text extraction for uploaded scripts.

use anyhow::{Context, Result};

/// Extract the text layer of a PDF, keeping at most `max_chars` characters.
///
/// CPU-bound; call from `spawn_blocking` inside async code.
pub fn extract_pdf_text(bytes: &[u8], max_chars: usize) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes).context("Failed to read PDF")?;
    Ok(truncate_chars(&text, max_chars))
}

/// Truncate on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
