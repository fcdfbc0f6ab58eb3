use serde::Serialize;

use crate::common::ListingId;

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteResponse {
    pub listing_id: ListingId,
    pub saved: bool,
}
