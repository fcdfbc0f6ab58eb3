use serde_json::Value;

use crate::types::{AuthUser, PasswordGrantRequest, Session, SignUpRequest, SignUpResponse};
use crate::{check_status, Result, SupabaseClient, SupabaseError};

pub struct Auth<'a> {
    inner: &'a SupabaseClient,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(inner: &'a SupabaseClient) -> Self {
        Self { inner }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.inner.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.inner
            .client
            .request(method, self.url(path))
            .header("apikey", &self.inner.anon_key)
    }

    /// Register a new email/password user with custom metadata.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &Value,
    ) -> Result<SignUpResponse> {
        let resp = self
            .request(reqwest::Method::POST, "signup")
            .bearer_auth(&self.inner.anon_key)
            .json(&SignUpRequest {
                email,
                password,
                data: metadata,
            })
            .send()
            .await?;

        let body: Value = check_status(resp).await?.json().await?;
        parse_sign_up(body)
    }

    /// Exchange email and password for a session.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        let resp = self
            .request(reqwest::Method::POST, "token?grant_type=password")
            .bearer_auth(&self.inner.anon_key)
            .json(&PasswordGrantRequest { email, password })
            .send()
            .await?;

        Ok(check_status(resp).await?.json().await?)
    }

    /// Revoke the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<()> {
        let resp = self
            .request(reqwest::Method::POST, "logout")
            .bearer_auth(access_token)
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    /// Send a password recovery email.
    pub async fn reset_password_for_email(&self, email: &str) -> Result<()> {
        let resp = self
            .request(reqwest::Method::POST, "recover")
            .bearer_auth(&self.inner.anon_key)
            .json(&serde_json::json!({ "email": email }))
            .send()
            .await?;

        check_status(resp).await?;
        Ok(())
    }

    /// Change the password of the user owning `access_token`.
    pub async fn update_password(&self, access_token: &str, new_password: &str) -> Result<AuthUser> {
        let resp = self
            .request(reqwest::Method::PUT, "user")
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "password": new_password }))
            .send()
            .await?;

        Ok(check_status(resp).await?.json().await?)
    }

    /// Resolve the user owning `access_token`.
    pub async fn get_user(&self, access_token: &str) -> Result<AuthUser> {
        let resp = self
            .request(reqwest::Method::GET, "user")
            .bearer_auth(access_token)
            .send()
            .await?;

        Ok(check_status(resp).await?.json().await?)
    }
}

fn parse_sign_up(body: Value) -> Result<SignUpResponse> {
    if body.get("access_token").is_some() {
        let session: Session = serde_json::from_value(body)
            .map_err(|e| SupabaseError::Unexpected(format!("sign-up session: {}", e)))?;
        return Ok(SignUpResponse {
            user: session.user.clone(),
            session: Some(session),
        });
    }

    let user_value = body.get("user").cloned().unwrap_or(body);
    let user: AuthUser = serde_json::from_value(user_value)
        .map_err(|e| SupabaseError::Unexpected(format!("sign-up user: {}", e)))?;

    Ok(SignUpResponse {
        user,
        session: None,
    })
}
