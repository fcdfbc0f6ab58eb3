//! Inquiries domain - buyers contacting creators about a listing

pub mod actions;
pub mod data;
pub mod models;

pub use data::{CreateInquiryRequest, UpdateInquiryStatusRequest};
pub use models::{Inquiry, InquiryStatus, InquiryWithListing};
