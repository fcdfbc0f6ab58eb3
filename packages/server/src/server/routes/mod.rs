// HTTP routes
pub mod admin;
pub mod ai;
pub mod auth;
pub mod favorites;
pub mod files;
pub mod health;
pub mod inquiries;
pub mod listings;
pub mod multipart;
pub mod users;

pub use admin::admin_routes;
pub use ai::ai_routes;
pub use auth::auth_routes;
pub use favorites::favorites_routes;
pub use files::files_routes;
pub use health::*;
pub use inquiries::inquiries_routes;
pub use listings::listings_routes;
pub use users::users_routes;

/// Multipart framing on top of the file itself
pub(crate) const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;
