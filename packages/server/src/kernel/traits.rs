// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Prompts, parsing and persistence live in the domains that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseAI, BaseObjectStorage)

use anyhow::Result;
use async_trait::async_trait;

pub use supabase_client::StorageObject;

// =============================================================================
// AI Trait (Infrastructure - hosted LLM)
// =============================================================================

/// A single-turn completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Completion text plus the accounting the materials table records.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub model: String,
    pub tokens_used: u32,
}

#[async_trait]
pub trait BaseAI: Send + Sync {
    /// Complete a prompt with the configured model
    async fn complete(&self, request: CompletionRequest) -> Result<Completion>;

    /// Model identifier recorded alongside generated materials
    fn model(&self) -> &str;
}

// =============================================================================
// Auth Provider Trait (Infrastructure - hosted auth service)
// =============================================================================

/// Session returned by a password login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user_id: String,
}

#[async_trait]
pub trait BaseAuthProvider: Send + Sync {
    /// Create an account; returns the new auth user id
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: serde_json::Value,
    ) -> Result<String>;

    /// Password login
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession>;

    /// Revoke the session behind an access token
    async fn sign_out(&self, access_token: &str) -> Result<()>;

    /// Send a password recovery email
    async fn send_password_reset(&self, email: &str) -> Result<()>;

    /// Change the password of the user owning `access_token`
    async fn update_password(&self, access_token: &str, new_password: &str) -> Result<()>;
}

// =============================================================================
// Object Storage Trait (Infrastructure - hosted bucket)
// =============================================================================

#[async_trait]
pub trait BaseObjectStorage: Send + Sync {
    /// Bucket all paths are relative to
    fn bucket(&self) -> &str;

    /// Upload (and overwrite) an object
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()>;

    async fn download(&self, path: &str) -> Result<Vec<u8>>;

    /// Time-limited URL for a private object
    async fn signed_url(&self, path: &str, expires_in_secs: u64) -> Result<String>;

    async fn remove(&self, paths: &[String]) -> Result<()>;

    /// Objects directly under `prefix`
    async fn list(&self, prefix: &str) -> Result<Vec<StorageObject>>;

    fn public_url(&self, path: &str) -> String;

    /// Recover the object path from a stored URL: the text after `{bucket}/`,
    /// without any query string.
    fn path_from_url(&self, url: &str) -> Option<String> {
        let marker = format!("{}/", self.bucket());
        let (_, rest) = url.split_once(&marker)?;
        let path = rest.split(['?', '#']).next().unwrap_or(rest);
        if path.is_empty() {
            None
        } else {
            Some(path.to_string())
        }
    }
}
