use serde::Deserialize;

use crate::common::ListingId;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateInquiryRequest {
    pub listing_id: ListingId,
    pub message: String,
    pub buyer_contact_email: String,
    pub buyer_name: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInquiryStatusRequest {
    pub status: String,
}
