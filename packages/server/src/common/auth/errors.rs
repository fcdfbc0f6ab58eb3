use thiserror::Error;

/// Authentication and authorization failures.
///
/// The display strings are returned to clients verbatim.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    AuthenticationRequired,

    #[error("User profile not found")]
    ProfileNotFound,

    #[error("Admin access required")]
    AdminRequired,

    #[error("{0}")]
    PermissionDenied(String),
}

impl AuthError {
    /// Whether the failure means "who are you?" (401) rather than
    /// "you may not" (403).
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            AuthError::AuthenticationRequired | AuthError::ProfileNotFound
        )
    }
}
