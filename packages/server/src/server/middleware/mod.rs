// HTTP middleware
pub mod ip_extractor;
pub mod jwt_auth;
pub mod rate_limit;

pub use ip_extractor::*;
pub use jwt_auth::*;
pub use rate_limit::*;
