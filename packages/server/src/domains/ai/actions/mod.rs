//! AI domain actions

mod analyze;
mod materials;

pub use analyze::{get_analysis, start_analysis};
pub use materials::{generate_one_pager, generate_pitch_deck, get_one_pager, get_pitch_deck};

use serde_json::Value;

use crate::common::{ApiResult, ListingId};
use crate::domains::ai::models::{IpMaterial, MaterialType};
use crate::kernel::ServerDeps;

/// Content of the latest analysis material, if any
pub(crate) async fn latest_analysis(
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<Option<Value>> {
    Ok(
        IpMaterial::find_latest(listing_id, MaterialType::Analysis, &deps.db_pool)
            .await?
            .map(|m| m.content),
    )
}
