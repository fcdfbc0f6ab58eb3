// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::{
    AuthSession, BaseAI, BaseAuthProvider, BaseObjectStorage, Completion, CompletionRequest,
    ServerDeps, StorageObject,
};
use crate::domains::auth::JwtService;

// =============================================================================
// Mock AI
// =============================================================================

pub struct MockAI {
    responses: Arc<Mutex<Vec<String>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    fail: bool,
}

impl MockAI {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// Add a text response to the queue
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push(response.into());
        self
    }

    /// Add a JSON response to the queue (will be serialized)
    pub fn with_json_response<T: serde::Serialize>(self, data: &T) -> Self {
        let json = serde_json::to_string(data).expect("Failed to serialize mock response");
        self.responses.lock().unwrap().push(json);
        self
    }

    /// Make every call fail, as if the API were down
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// Get all requests that were sent to the AI
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Get the last prompt sent to the AI
    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|c| c.prompt.clone())
    }

    /// Check if a prompt containing the given text was sent
    pub fn was_called_with(&self, text: &str) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.prompt.contains(text))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl Default for MockAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAI for MockAI {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
        self.calls.lock().unwrap().push(request);

        if self.fail {
            anyhow::bail!("Mock AI unavailable");
        }

        let mut responses = self.responses.lock().unwrap();
        let text = if !responses.is_empty() {
            responses.remove(0)
        } else {
            "Mock AI response".to_string()
        };

        Ok(Completion {
            text,
            model: "mock-model".to_string(),
            tokens_used: 42,
        })
    }

    fn model(&self) -> &str {
        "mock-model"
    }
}

// =============================================================================
// Mock Auth Provider
// =============================================================================

struct MockAccount {
    user_id: String,
    password: String,
}

/// In-memory auth service. Sign-in returns the token produced by the
/// configured `token_issuer`, so tests can mint real JWTs.
pub struct MockAuthProvider {
    accounts: Arc<Mutex<HashMap<String, MockAccount>>>,
    token_issuer: Arc<dyn Fn(&str) -> String + Send + Sync>,
    reset_requests: Arc<Mutex<Vec<String>>>,
    signed_out: Arc<Mutex<Vec<String>>>,
    password_updates: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAuthProvider {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(Mutex::new(HashMap::new())),
            token_issuer: Arc::new(|user_id: &str| format!("mock-token-{}", user_id)),
            reset_requests: Arc::new(Mutex::new(Vec::new())),
            signed_out: Arc::new(Mutex::new(Vec::new())),
            password_updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Issue access tokens with the given function (user id -> token)
    pub fn with_token_issuer(
        mut self,
        issuer: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.token_issuer = Arc::new(issuer);
        self
    }

    /// Pre-register an account
    pub fn with_account(self, email: &str, password: &str, user_id: &str) -> Self {
        self.accounts.lock().unwrap().insert(
            email.to_lowercase(),
            MockAccount {
                user_id: user_id.to_string(),
                password: password.to_string(),
            },
        );
        self
    }

    pub fn reset_requests(&self) -> Vec<String> {
        self.reset_requests.lock().unwrap().clone()
    }

    pub fn signed_out_tokens(&self) -> Vec<String> {
        self.signed_out.lock().unwrap().clone()
    }

    /// (access_token, new_password) pairs
    pub fn password_updates(&self) -> Vec<(String, String)> {
        self.password_updates.lock().unwrap().clone()
    }
}

impl Default for MockAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAuthProvider for MockAuthProvider {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _metadata: serde_json::Value,
    ) -> Result<String> {
        let mut accounts = self.accounts.lock().unwrap();
        let key = email.to_lowercase();
        if accounts.contains_key(&key) {
            anyhow::bail!("Supabase API error (422): User already registered");
        }

        let user_id = uuid::Uuid::new_v4().to_string();
        accounts.insert(
            key,
            MockAccount {
                user_id: user_id.clone(),
                password: password.to_string(),
            },
        );
        Ok(user_id)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let accounts = self.accounts.lock().unwrap();
        match accounts.get(&email.to_lowercase()) {
            Some(account) if account.password == password => Ok(AuthSession {
                access_token: (self.token_issuer)(&account.user_id),
                user_id: account.user_id.clone(),
            }),
            _ => anyhow::bail!("Supabase API error (400): Invalid login credentials"),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        self.signed_out
            .lock()
            .unwrap()
            .push(access_token.to_string());
        Ok(())
    }

    async fn send_password_reset(&self, email: &str) -> Result<()> {
        self.reset_requests.lock().unwrap().push(email.to_string());
        Ok(())
    }

    async fn update_password(&self, access_token: &str, new_password: &str) -> Result<()> {
        self.password_updates
            .lock()
            .unwrap()
            .push((access_token.to_string(), new_password.to_string()));
        Ok(())
    }
}

// =============================================================================
// Mock Object Storage
// =============================================================================

/// In-memory bucket keyed by object path.
pub struct MockObjectStorage {
    bucket: String,
    objects: Arc<Mutex<HashMap<String, (Vec<u8>, String)>>>,
    removed: Arc<Mutex<Vec<String>>>,
    downloads: Arc<Mutex<Vec<String>>>,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self {
            bucket: "ip-materials".to_string(),
            objects: Arc::new(Mutex::new(HashMap::new())),
            removed: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Seed an object
    pub fn with_object(self, path: &str, bytes: Vec<u8>, content_type: &str) -> Self {
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), (bytes, content_type.to_string()));
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.lock().unwrap().contains_key(path)
    }

    pub fn content_type_of(&self, path: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(path)
            .map(|(_, content_type)| content_type.clone())
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }

    /// Paths requested through `download`, in order
    pub fn downloads(&self) -> Vec<String> {
        self.downloads.lock().unwrap().clone()
    }
}

impl Default for MockObjectStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseObjectStorage for MockObjectStorage {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        self.objects
            .lock()
            .unwrap()
            .insert(path.to_string(), (bytes, content_type.to_string()));
        Ok(())
    }

    async fn download(&self, path: &str) -> Result<Vec<u8>> {
        self.downloads.lock().unwrap().push(path.to_string());
        self.objects
            .lock()
            .unwrap()
            .get(path)
            .map(|(bytes, _)| bytes.clone())
            .ok_or_else(|| anyhow::anyhow!("Object not found: {}", path))
    }

    async fn signed_url(&self, path: &str, expires_in_secs: u64) -> Result<String> {
        Ok(format!(
            "https://storage.test/sign/{}/{}?expires_in={}",
            self.bucket, path, expires_in_secs
        ))
    }

    async fn remove(&self, paths: &[String]) -> Result<()> {
        let mut objects = self.objects.lock().unwrap();
        let mut removed = self.removed.lock().unwrap();
        for path in paths {
            objects.remove(path);
            removed.push(path.clone());
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StorageObject>> {
        let prefix = prefix.trim_end_matches('/');
        let objects = self.objects.lock().unwrap();
        let mut names: Vec<String> = objects
            .keys()
            .filter_map(|path| path.strip_prefix(prefix))
            .map(|rest| rest.trim_start_matches('/').to_string())
            .filter(|name| !name.is_empty() && !name.contains('/'))
            .collect();
        names.sort();

        Ok(names
            .into_iter()
            .map(|name| StorageObject {
                name,
                id: None,
                created_at: None,
                updated_at: None,
                metadata: None,
            })
            .collect())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "https://storage.test/storage/v1/object/public/{}/{}",
            self.bucket, path
        )
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-with-enough-length-for-hs256";

#[derive(Clone)]
pub struct TestDependencies {
    pub ai: Arc<MockAI>,
    pub auth_provider: Arc<MockAuthProvider>,
    pub storage: Arc<MockObjectStorage>,
    pub jwt_service: Arc<JwtService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        let jwt_service = Arc::new(JwtService::new(TEST_JWT_SECRET));
        let issuer = jwt_service.clone();
        let auth_provider = MockAuthProvider::new().with_token_issuer(move |user_id| {
            issuer
                .issue_token(user_id)
                .expect("Failed to sign mock access token")
        });

        Self {
            ai: Arc::new(MockAI::new()),
            auth_provider: Arc::new(auth_provider),
            storage: Arc::new(MockObjectStorage::new()),
            jwt_service,
        }
    }

    /// Set a mock AI
    pub fn mock_ai(mut self, ai: MockAI) -> Self {
        self.ai = Arc::new(ai);
        self
    }

    /// Set a mock object storage
    pub fn mock_storage(mut self, storage: MockObjectStorage) -> Self {
        self.storage = Arc::new(storage);
        self
    }

    /// Build ServerDeps backed by these mocks
    pub fn into_server_deps(self, db_pool: PgPool) -> ServerDeps {
        ServerDeps::new(
            db_pool,
            self.ai,
            self.auth_provider,
            self.storage,
            self.jwt_service,
            10 * 1024 * 1024,
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
