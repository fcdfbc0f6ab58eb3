//! Admin domain - moderation and platform statistics

pub mod actions;
pub mod data;

pub use data::{AdminListingsQuery, FeatureQuery, FeaturedChange, PlatformStats, StatusChange};
