//! Favorites domain - listings a user has saved.

pub mod actions;
pub mod data;
pub mod models;

pub use data::FavoriteResponse;
pub use models::Favorite;
