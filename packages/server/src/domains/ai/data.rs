use serde::Serialize;
use serde_json::Value;

use crate::common::ListingId;

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub listing_id: ListingId,
    pub status: String,
    pub analysis: Option<Value>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OnePagerResponse {
    pub listing_id: ListingId,
    pub one_pager: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PitchDeckResponse {
    pub listing_id: ListingId,
    pub pitch_deck: Value,
    pub message: String,
}
