//! Users domain actions - profile reads and edits, avatar management

mod avatar;
mod profile;

pub use avatar::{delete_avatar, upload_avatar, MAX_AVATAR_BYTES};
pub use profile::{get_public_profile, update_profile};
