use tracing::info;

use crate::common::{ApiError, ApiResult, InquiryId};
use crate::domains::inquiries::data::UpdateInquiryStatusRequest;
use crate::domains::inquiries::models::{Inquiry, InquiryStatus, InquiryWithListing};
use crate::domains::listings::Listing;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

pub async fn sent_inquiries(user: &User, deps: &ServerDeps) -> ApiResult<Vec<Inquiry>> {
    Ok(Inquiry::find_by_buyer(user.id, &deps.db_pool).await?)
}

pub async fn received_inquiries(
    user: &User,
    deps: &ServerDeps,
) -> ApiResult<Vec<InquiryWithListing>> {
    Ok(Inquiry::find_for_creator(user.id, &deps.db_pool).await?)
}

/// Move an inquiry to a new status. Listing owner or admin only.
pub async fn update_inquiry_status(
    user: &User,
    inquiry_id: InquiryId,
    request: UpdateInquiryStatusRequest,
    deps: &ServerDeps,
) -> ApiResult<Inquiry> {
    let status: InquiryStatus = request.status.parse().map_err(|_| {
        ApiError::unprocessable("status must be one of: new, read, responded, closed")
    })?;

    let inquiry = Inquiry::find_by_id(inquiry_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Inquiry not found"))?;

    let listing = Listing::find_by_id(inquiry.listing_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    user.actor().require_owner_or_admin(
        listing.creator_id,
        "You don't have permission to update this inquiry",
    )?;

    let updated = Inquiry::set_status(inquiry_id, status, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Inquiry not found"))?;

    info!(inquiry_id = %inquiry_id, status = %status, "Inquiry status updated");
    Ok(updated)
}
