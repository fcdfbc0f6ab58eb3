//! Offset pagination arguments.
//!
//! ```rust,ignore
//! let page = PageArgs { limit: query.limit, offset: query.offset }.validate(50, 100)?;
//! Listing::search(&filter, page.limit, page.offset, pool).await?;
//! ```

use serde::Deserialize;

use super::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageArgs {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Bounds-checked limit/offset, ready to bind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedPage {
    pub limit: i64,
    pub offset: i64,
}

impl PageArgs {
    pub fn validate(self, default_limit: i64, max_limit: i64) -> ApiResult<ValidatedPage> {
        let limit = self.limit.unwrap_or(default_limit);
        let offset = self.offset.unwrap_or(0);

        if limit < 1 || limit > max_limit {
            return Err(ApiError::unprocessable(format!(
                "limit must be between 1 and {}",
                max_limit
            )));
        }
        if offset < 0 {
            return Err(ApiError::unprocessable("offset must be >= 0"));
        }

        Ok(ValidatedPage { limit, offset })
    }
}
