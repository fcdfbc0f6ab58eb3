use super::{AuthError, UserRole};
use crate::common::entity_ids::UserId;

/// The authenticated caller, reduced to what authorization needs.
#[derive(Debug, Clone, Copy)]
pub struct Actor {
    user_id: UserId,
    role: Option<UserRole>,
}

impl Actor {
    /// `role` is the raw `users.role` value; unknown values grant nothing.
    pub fn new(user_id: UserId, role: &str) -> Self {
        Self {
            user_id,
            role: role.parse().ok(),
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn is(&self, role: UserRole) -> bool {
        self.role == Some(role)
    }

    pub fn is_admin(&self) -> bool {
        self.is(UserRole::Admin)
    }

    pub fn owns(&self, owner_id: UserId) -> bool {
        self.user_id == owner_id
    }

    pub fn require_role(&self, role: UserRole, message: &str) -> Result<(), AuthError> {
        if self.is(role) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(message.to_string()))
        }
    }

    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::AdminRequired)
        }
    }

    pub fn require_owner(&self, owner_id: UserId, message: &str) -> Result<(), AuthError> {
        if self.owns(owner_id) {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(message.to_string()))
        }
    }

    pub fn require_owner_or_admin(&self, owner_id: UserId, message: &str) -> Result<(), AuthError> {
        if self.owns(owner_id) || self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::PermissionDenied(message.to_string()))
        }
    }
}
