use tracing::info;

use crate::common::{ApiError, ApiResult, ListingId};
use crate::domains::ai::data::AnalysisResponse;
use crate::domains::ai::pipeline::run_analysis;
use crate::domains::listings::actions::find_managed_listing;
use crate::domains::listings::{AnalysisStatus, Listing};
use crate::domains::users::User;
use crate::kernel::ServerDeps;

use super::latest_analysis;

/// Kick off a background analysis unless one is already running.
pub async fn start_analysis(
    user: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<AnalysisResponse> {
    let listing = find_managed_listing(user, listing_id, deps).await?;

    let already_running = || AnalysisResponse {
        listing_id,
        status: AnalysisStatus::Analyzing.to_string(),
        analysis: None,
        message: "Analysis already in progress".to_string(),
    };

    if listing.is_analyzing() {
        return Ok(already_running());
    }

    // The conditional update is the guard; a concurrent request loses here.
    if Listing::try_start_analysis(listing_id, &deps.db_pool)
        .await?
        .is_none()
    {
        return Ok(already_running());
    }

    tokio::spawn(run_analysis(listing_id, deps.clone()));
    info!(listing_id = %listing_id, user_id = %user.id, "Analysis started");

    Ok(AnalysisResponse {
        listing_id,
        status: AnalysisStatus::Analyzing.to_string(),
        analysis: None,
        message: format!(
            "Analysis started for '{}'. This takes 30-60 seconds.",
            listing.title
        ),
    })
}

pub async fn get_analysis(listing_id: ListingId, deps: &ServerDeps) -> ApiResult<AnalysisResponse> {
    let listing = Listing::find_by_id(listing_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    let analysis = latest_analysis(listing_id, deps).await?;

    Ok(AnalysisResponse {
        listing_id,
        message: format!("Status: {}", listing.ai_analysis_status),
        status: listing.ai_analysis_status,
        analysis,
    })
}
