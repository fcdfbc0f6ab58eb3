use tracing::info;

use crate::common::utils::require_email;
use crate::common::{ApiError, ApiResult};
use crate::domains::inquiries::data::CreateInquiryRequest;
use crate::domains::inquiries::models::Inquiry;
use crate::domains::listings::Listing;
use crate::domains::users::User;
use crate::kernel::ServerDeps;

/// Send an inquiry about a published listing.
pub async fn create_inquiry(
    user: &User,
    request: CreateInquiryRequest,
    deps: &ServerDeps,
) -> ApiResult<Inquiry> {
    if request.message.trim().is_empty() {
        return Err(ApiError::unprocessable("message must not be empty"));
    }
    require_email("buyer_contact_email", &request.buyer_contact_email)?;

    let listing = Listing::find_published_by_id(request.listing_id, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("Listing not found"))?;

    let buyer_name = request
        .buyer_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(&user.display_name);

    let inquiry = Inquiry::create(
        listing.id,
        user.id,
        buyer_name,
        request.buyer_contact_email.trim(),
        request.company_name.as_deref(),
        &request.message,
        &deps.db_pool,
    )
    .await?;

    Listing::increment_inquiry_count(listing.id, &deps.db_pool).await?;

    info!(inquiry_id = %inquiry.id, listing_id = %listing.id, buyer_id = %user.id, "Inquiry sent");
    Ok(inquiry)
}
