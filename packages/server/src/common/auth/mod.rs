/// Authorization for the marketplace.
///
/// Roles come from the `users.role` column; every check is an equality
/// comparison on that column plus, where relevant, listing ownership:
///
/// ```rust,ignore
/// use crate::common::auth::Actor;
///
/// user.actor()
///     .require_owner_or_admin(listing.creator_id, "Not authorized")?;
/// ```
mod actor;
mod errors;
mod role;

pub use actor::Actor;
pub use errors::AuthError;
pub use role::UserRole;
