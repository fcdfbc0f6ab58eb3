use crate::types::{SignedUrlResponse, StorageObject};
use crate::{check_status, Result, SupabaseClient};

/// Storage operations scoped to a single bucket.
pub struct Bucket<'a> {
    inner: &'a SupabaseClient,
    bucket: &'a str,
}

impl<'a> Bucket<'a> {
    pub(crate) fn new(inner: &'a SupabaseClient, bucket: &'a str) -> Self {
        Self { inner, bucket }
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.inner.base_url,
            self.bucket,
            encode_path(path)
        )
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.inner
            .client
            .request(method, url)
            .header("apikey", &self.inner.service_key)
            .bearer_auth(&self.inner.service_key)
    }

    /// Upload bytes to `path`, replacing any existing object.
    pub async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<()> {
        let size = bytes.len();
        let resp = self
            .request(reqwest::Method::POST, self.object_url(path))
            .header("content-type", content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await?;

        check_status(resp).await?;
        tracing::debug!(bucket = self.bucket, path, size, "Uploaded object");
        Ok(())
    }

    /// Download the raw bytes of an object.
    pub async fn download(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self
            .request(reqwest::Method::GET, self.object_url(path))
            .send()
            .await?;

        let bytes = check_status(resp).await?.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Create a time-limited URL for a private object.
    pub async fn create_signed_url(&self, path: &str, expires_in_secs: u64) -> Result<String> {
        let url = format!(
            "{}/storage/v1/object/sign/{}/{}",
            self.inner.base_url,
            self.bucket,
            encode_path(path)
        );
        let resp = self
            .request(reqwest::Method::POST, url)
            .json(&serde_json::json!({ "expiresIn": expires_in_secs }))
            .send()
            .await?;

        let signed: SignedUrlResponse = check_status(resp).await?.json().await?;
        Ok(absolute_signed_url(&self.inner.base_url, &signed.signed_url))
    }

    /// Remove one or more objects.
    pub async fn remove(&self, paths: &[String]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let url = format!("{}/storage/v1/object/{}", self.inner.base_url, self.bucket);
        let resp = self
            .request(reqwest::Method::DELETE, url)
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await?;

        check_status(resp).await?;
        tracing::debug!(bucket = self.bucket, count = paths.len(), "Removed objects");
        Ok(())
    }

    /// List objects directly under `prefix`, sorted by name.
    pub async fn list(&self, prefix: &str) -> Result<Vec<StorageObject>> {
        let url = format!(
            "{}/storage/v1/object/list/{}",
            self.inner.base_url, self.bucket
        );
        let resp = self
            .request(reqwest::Method::POST, url)
            .json(&serde_json::json!({
                "prefix": prefix,
                "limit": 100,
                "offset": 0,
                "sortBy": { "column": "name", "order": "asc" }
            }))
            .send()
            .await?;

        Ok(check_status(resp).await?.json().await?)
    }

    /// Public URL of an object (only resolvable for public buckets).
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.inner.base_url,
            self.bucket,
            encode_path(path)
        )
    }
}

fn encode_path(path: &str) -> String {
    path.trim_start_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// The sign endpoint answers with a path relative to `/storage/v1`.
fn absolute_signed_url(base_url: &str, signed: &str) -> String {
    if signed.starts_with("http://") || signed.starts_with("https://") {
        return signed.to_string();
    }
    format!(
        "{}/storage/v1/{}",
        base_url,
        signed.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client(server: &MockServer) -> SupabaseClient {
        SupabaseClient::new(server.base_url(), "anon".into(), "service".into())
    }

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("a b/c.pdf"), "a%20b/c.pdf");
        assert_eq!(encode_path("/u/l/x.png"), "u/l/x.png");
    }

    #[test]
    fn test_absolute_signed_url() {
        assert_eq!(
            absolute_signed_url("https://x.supabase.co", "/object/sign/b/p?token=t"),
            "https://x.supabase.co/storage/v1/object/sign/b/p?token=t"
        );
        assert_eq!(
            absolute_signed_url("https://x.supabase.co", "https://cdn/p"),
            "https://cdn/p"
        );
    }

    #[tokio::test]
    async fn test_upload_uses_service_key_and_upsert() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/storage/v1/object/ip-materials/u1/l1/script.pdf")
                    .header("apikey", "service")
                    .header("x-upsert", "true")
                    .header("content-type", "application/pdf");
                then.status(200).json_body(serde_json::json!({"Key": "ok"}));
            })
            .await;

        let supabase = client(&server);
        supabase
            .storage("ip-materials")
            .upload("u1/l1/script.pdf", b"%PDF-1.4".to_vec(), "application/pdf")
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_signed_url() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/storage/v1/object/sign/ip-materials/u1/l1/script.pdf")
                    .json_body(serde_json::json!({"expiresIn": 3600}));
                then.status(200).json_body(serde_json::json!({
                    "signedURL": "/object/sign/ip-materials/u1/l1/script.pdf?token=abc"
                }));
            })
            .await;

        let supabase = client(&server);
        let url = supabase
            .storage("ip-materials")
            .create_signed_url("u1/l1/script.pdf", 3600)
            .await
            .unwrap();

        assert_eq!(
            url,
            format!(
                "{}/storage/v1/object/sign/ip-materials/u1/l1/script.pdf?token=abc",
                server.base_url()
            )
        );
    }

    #[tokio::test]
    async fn test_download_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/storage/v1/object/ip-materials/missing.pdf");
                then.status(404)
                    .json_body(serde_json::json!({"statusCode": "404", "message": "Object not found"}));
            })
            .await;

        let supabase = client(&server);
        let err = supabase
            .storage("ip-materials")
            .download("missing.pdf")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("Object not found"));
    }

    #[tokio::test]
    async fn test_remove_empty_is_noop() {
        let supabase = SupabaseClient::new("http://127.0.0.1:1", "a".into(), "s".into());
        supabase.storage("b").remove(&[]).await.unwrap();
    }
}
