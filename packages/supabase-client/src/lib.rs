//! Pure Supabase REST API client.
//!
//! Covers the two hosted services the marketplace relies on besides Postgres:
//! Auth (sign-up, password login, logout, recovery, password change) and
//! Storage (upload, download, signed URLs, removal, listing).
//!
//! # Example
//!
//! ```rust,ignore
//! use supabase_client::SupabaseClient;
//!
//! let client = SupabaseClient::new(url, anon_key, service_key);
//!
//! let session = client.auth().sign_in_with_password("a@b.com", "secret").await?;
//! let bucket = client.storage("ip-materials");
//! bucket.upload("u/l/script.pdf", bytes, "application/pdf").await?;
//! ```

pub mod auth;
pub mod error;
pub mod storage;
pub mod types;

pub use auth::Auth;
pub use error::{Result, SupabaseError};
pub use storage::Bucket;
pub use types::{AuthUser, Session, SignUpResponse, StorageObject};

use types::ErrorBody;

pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: impl Into<String>, anon_key: String, service_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key,
            service_key,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Auth API (GoTrue), authenticated with the anon key.
    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    /// Storage API for one bucket, authenticated with the service key.
    pub fn storage<'a>(&'a self, bucket: &'a str) -> Bucket<'a> {
        Bucket::new(self, bucket)
    }
}

/// Turn a non-2xx response into `SupabaseError::Api`, passing successes through.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or(body);

    tracing::debug!(status = status.as_u16(), %message, "Supabase API error");

    Err(SupabaseError::Api {
        status: status.as_u16(),
        message,
    })
}
