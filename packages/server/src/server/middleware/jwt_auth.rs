use crate::common::UserId;
use crate::domains::auth::JwtService;
use axum::{http::HeaderMap, middleware::Next, response::Response};
use std::sync::Arc;
use tracing::debug;

/// Authenticated caller taken from a verified access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: Option<String>,
    /// Raw token, forwarded to the auth service for logout / password change
    pub access_token: String,
}

/// JWT authentication middleware
///
/// Extracts the access token from the Authorization header, verifies it, and adds AuthUser to
/// request extensions. If no token or invalid token, request continues without AuthUser
/// (public access); protected handlers reject it through the `CurrentUser` extractor.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(request.headers(), &jwt_service);

    if let Some(user) = auth_user {
        debug!(user_id = %user.user_id, "Authenticated request");
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Token from the Authorization header (handles both "Bearer <token>" and raw token)
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get("authorization")?.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Extract and verify the access token from request headers
fn extract_auth_user(headers: &HeaderMap, jwt_service: &JwtService) -> Option<AuthUser> {
    let token = bearer_token(headers)?;
    let claims = jwt_service.verify_token(token).ok()?;
    let user_id = UserId::parse(&claims.sub).ok()?;

    Some(AuthUser {
        user_id,
        email: claims.email,
        access_token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = JwtService::new("test_secret");
        let user_id = UserId::new();
        let token = jwt_service.issue_token(&user_id.to_string()).unwrap();

        let auth_user = extract_auth_user(&headers_with(&format!("Bearer {}", token)), &jwt_service);
        let auth_user = auth_user.expect("token should verify");
        assert_eq!(auth_user.user_id, user_id);
        assert_eq!(auth_user.access_token, token);
    }

    #[test]
    fn test_extract_token_without_bearer() {
        let jwt_service = JwtService::new("test_secret");
        let user_id = UserId::new();
        let token = jwt_service.issue_token(&user_id.to_string()).unwrap();

        let auth_user = extract_auth_user(&headers_with(&token), &jwt_service);
        assert_eq!(auth_user.map(|u| u.user_id), Some(user_id));
    }

    #[test]
    fn test_no_auth_header() {
        let jwt_service = JwtService::new("test_secret");
        assert!(extract_auth_user(&HeaderMap::new(), &jwt_service).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let jwt_service = JwtService::new("test_secret");
        assert!(extract_auth_user(&headers_with("Bearer invalid_token"), &jwt_service).is_none());
    }

    #[test]
    fn test_non_uuid_subject_rejected() {
        let jwt_service = JwtService::new("test_secret");
        let token = jwt_service.issue_token("not-a-uuid").unwrap();
        assert!(extract_auth_user(&headers_with(&token), &jwt_service).is_none());
    }
}
