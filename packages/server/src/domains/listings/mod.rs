//! Listings domain - IP properties offered by creators
//!
//! Responsibilities:
//! - Creator CRUD with ownership checks
//! - Public catalogue (published only) with filters, sorting and view counting
//! - File URL, counter and analysis-status bookkeeping used by other domains

pub mod actions;
pub mod data;
pub mod models;

pub use data::{CreateListingRequest, ListListingsQuery, UpdateListingRequest};
pub use models::{AnalysisStatus, Listing, ListingFilter, ListingSort, ListingStatus, ListingTier, SortOrder};
