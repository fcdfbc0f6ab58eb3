//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly to create test data.

use anyhow::Result;
use server_core::common::utils::unique_slug;
use server_core::common::UserId;
use server_core::domains::listings::{CreateListingRequest, Listing, ListingStatus, ListingTier};
use server_core::domains::users::User;
use sqlx::PgPool;

/// Create a profile with a unique email for the given role
pub async fn create_test_user(pool: &PgPool, role: &str) -> Result<User> {
    let id = UserId::new();
    let email = format!("{}-{}@example.test", role, id);
    User::create(id, &email, role, &format!("Test {}", role), pool).await
}

pub fn listing_request(title: &str) -> CreateListingRequest {
    CreateListingRequest {
        title: title.to_string(),
        tagline: Some("A story worth telling".to_string()),
        description: "A lighthouse keeper uncovers what the lamp really guards.".to_string(),
        genre: "Horror".to_string(),
        format: "Feature Film".to_string(),
        tier: None,
        period: Some("1890s".to_string()),
        location: Some("Maine coast".to_string()),
        world_type: None,
        themes: vec!["isolation".to_string()],
        target_audience: None,
        comparables: vec!["The Lighthouse".to_string()],
        logline: None,
        rights_holder: None,
        rights_holder_contact: None,
        available_rights: vec![],
        available_territories: vec![],
    }
}

/// Create a draft listing owned by `creator`
pub async fn create_test_listing(pool: &PgPool, creator: &User, title: &str) -> Result<Listing> {
    Listing::create(
        creator.id,
        &unique_slug(title),
        ListingTier::HiddenGem,
        &listing_request(title),
        pool,
    )
    .await
}

/// Create a listing and move it straight to `published`
pub async fn create_published_listing(
    pool: &PgPool,
    creator: &User,
    title: &str,
) -> Result<Listing> {
    let listing = create_test_listing(pool, creator, title).await?;
    let published = Listing::set_status(listing.id, ListingStatus::Published, pool).await?;
    published.ok_or_else(|| anyhow::anyhow!("listing vanished"))
}
