//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container used by every action.
//! All hosted services sit behind trait abstractions so tests can swap in mocks.

use anyhow::Result;
use anthropic_client::{AnthropicClient, Message, MessagesRequest};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use supabase_client::SupabaseClient;

use crate::domains::auth::JwtService;
use crate::kernel::{
    AuthSession, BaseAI, BaseAuthProvider, BaseObjectStorage, Completion, CompletionRequest,
    StorageObject,
};

// =============================================================================
// Anthropic Adapter (implements BaseAI)
// =============================================================================

pub struct AnthropicAdapter {
    client: AnthropicClient,
    model: String,
}

impl AnthropicAdapter {
    pub fn new(client: AnthropicClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

#[async_trait]
impl BaseAI for AnthropicAdapter {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        let response = self
            .client
            .messages(
                MessagesRequest::new(&self.model)
                    .max_tokens(request.max_tokens)
                    .temperature(request.temperature)
                    .message(Message::user(request.prompt)),
            )
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;

        Ok(Completion {
            text: response.content,
            model: self.model.clone(),
            tokens_used: response.usage.total(),
        })
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// =============================================================================
// Supabase Auth Adapter (implements BaseAuthProvider)
// =============================================================================

pub struct SupabaseAuthAdapter(pub Arc<SupabaseClient>);

impl SupabaseAuthAdapter {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseAuthProvider for SupabaseAuthAdapter {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: serde_json::Value,
    ) -> Result<String> {
        let response = self
            .0
            .auth()
            .sign_up(email, password, &metadata)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(response.user.id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let session = self
            .0
            .auth()
            .sign_in_with_password(email, password)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(AuthSession {
            access_token: session.access_token,
            user_id: session.user.id,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        self.0
            .auth()
            .sign_out(access_token)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        self.0
            .auth()
            .reset_password_for_email(email)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn update_password(&self, access_token: &str, new_password: &str) -> Result<()> {
        self.0
            .auth()
            .update_password(access_token, new_password)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// Supabase Storage Adapter (implements BaseObjectStorage)
// =============================================================================

pub struct SupabaseStorageAdapter {
    client: Arc<SupabaseClient>,
    bucket: String,
}

impl SupabaseStorageAdapter {
    pub fn new(client: Arc<SupabaseClient>, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

#[async_trait]
impl BaseObjectStorage for SupabaseStorageAdapter {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.client
            .storage(&self.bucket)
            .upload(path, bytes, content_type)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        self.client
            .storage(&self.bucket)
            .download(path)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn signed_url(&self, path: &str, expires_in_secs: u64) -> Result<String> {
        self.client
            .storage(&self.bucket)
            .create_signed_url(path, expires_in_secs)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        self.client
            .storage(&self.bucket)
            .remove(paths)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StorageObject>> {
        self.client
            .storage(&self.bucket)
            .list(prefix)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    fn public_url(&self, path: &str) -> String {
        self.client.storage(&self.bucket).public_url(path)
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies accessible to every action (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub ai: Arc<dyn BaseAI>,
    pub auth_provider: Arc<dyn BaseAuthProvider>,
    pub storage: Arc<dyn BaseObjectStorage>,
    /// Verifies access tokens issued by the auth service
    pub jwt_service: Arc<JwtService>,
    /// Upper bound for listing file uploads
    pub max_upload_bytes: usize,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        ai: Arc<dyn BaseAI>,
        auth_provider: Arc<dyn BaseAuthProvider>,
        storage: Arc<dyn BaseObjectStorage>,
        jwt_service: Arc<JwtService>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            db_pool,
            ai,
            auth_provider,
            storage,
            jwt_service,
            max_upload_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_path_from_public_url() {
        let client = Arc::new(SupabaseClient::new(
            "https://abc.supabase.co",
            "anon".into(),
            "service".into(),
        ));
        let storage = SupabaseStorageAdapter::new(client, "ip-materials");

        let url = storage.public_url("u1/l1/script.pdf");
        assert_eq!(
            url,
            "https://abc.supabase.co/storage/v1/object/public/ip-materials/u1/l1/script.pdf"
        );
        assert_eq!(
            storage.path_from_url(&url).as_deref(),
            Some("u1/l1/script.pdf")
        );
        assert_eq!(
            storage
                .path_from_url("https://x/ip-materials/u1/l1/poster.png?token=abc")
                .as_deref(),
            Some("u1/l1/poster.png")
        );
        assert_eq!(storage.path_from_url("https://elsewhere/file.pdf"), None);
    }
}
