//! Users domain - marketplace profiles keyed by the auth service's user id.

pub mod actions;
pub mod data;
pub mod models;

pub use data::{PublicProfile, UpdateProfileRequest, UserSummary};
pub use models::User;
