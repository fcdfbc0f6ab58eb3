//! Typed ID definitions for the marketplace entities.

pub use super::id::Id;

/// Marker type for user profiles (id shared with the auth service).
pub struct User;

/// Marker type for IP listings.
pub struct Listing;

/// Marker type for AI-generated materials attached to a listing.
pub struct Material;

/// Marker type for buyer inquiries.
pub struct Inquiry;

pub type UserId = Id<User>;
pub type ListingId = Id<Listing>;
pub type MaterialId = Id<Material>;
pub type InquiryId = Id<Inquiry>;
