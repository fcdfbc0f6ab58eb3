// Business domains
pub mod admin;
pub mod ai;
pub mod auth;
pub mod favorites;
pub mod files;
pub mod inquiries;
pub mod listings;
pub mod users;
