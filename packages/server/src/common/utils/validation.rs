//! Request field validation helpers.

use lazy_static::lazy_static;
use regex::Regex;

use crate::common::error::{ApiError, ApiResult};

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex");
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

pub fn require_email(field: &str, value: &str) -> ApiResult<()> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(ApiError::unprocessable(format!(
            "{} must be a valid email address",
            field
        )))
    }
}

/// Length check in characters, inclusive on both ends.
pub fn require_len(field: &str, value: &str, min: usize, max: Option<usize>) -> ApiResult<()> {
    let len = value.chars().count();
    if len < min {
        return Err(ApiError::unprocessable(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    if let Some(max) = max {
        if len > max {
            return Err(ApiError::unprocessable(format!(
                "{} must be at most {} characters",
                field, max
            )));
        }
    }
    Ok(())
}

pub fn require_opt_len(
    field: &str,
    value: Option<&str>,
    min: usize,
    max: Option<usize>,
) -> ApiResult<()> {
    match value {
        Some(v) => require_len(field, v, min, max),
        None => Ok(()),
    }
}

/// Escape `%`, `_` and `\` so user input matches literally inside LIKE.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
