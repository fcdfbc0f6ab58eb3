use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{InquiryId, ListingId, UserId};

/// A buyer's message about a listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Inquiry {
    pub id: InquiryId,
    pub listing_id: ListingId,
    pub buyer_id: UserId,
    pub buyer_name: String,
    pub buyer_contact_email: String,
    pub company_name: Option<String>,
    pub message: String,
    pub status: String, // 'new', 'read', 'responded', 'closed'
    pub created_at: DateTime<Utc>,
}

/// Inquiry joined with the title of its listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct InquiryWithListing {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub inquiry: Inquiry,
    pub listing_title: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    New,
    Read,
    Responded,
    Closed,
}

impl std::fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InquiryStatus::New => write!(f, "new"),
            InquiryStatus::Read => write!(f, "read"),
            InquiryStatus::Responded => write!(f, "responded"),
            InquiryStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for InquiryStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "new" => Ok(InquiryStatus::New),
            "read" => Ok(InquiryStatus::Read),
            "responded" => Ok(InquiryStatus::Responded),
            "closed" => Ok(InquiryStatus::Closed),
            _ => Err(anyhow::anyhow!("Invalid inquiry status: {}", s)),
        }
    }
}

impl Inquiry {
    pub async fn create(
        listing_id: ListingId,
        buyer_id: UserId,
        buyer_name: &str,
        buyer_contact_email: &str,
        company_name: Option<&str>,
        message: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO inquiries (listing_id, buyer_id, buyer_name, buyer_contact_email, company_name, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(listing_id)
        .bind(buyer_id)
        .bind(buyer_name)
        .bind(buyer_contact_email)
        .bind(company_name)
        .bind(message)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: InquiryId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM inquiries WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_buyer(buyer_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM inquiries WHERE buyer_id = $1 ORDER BY created_at DESC",
        )
        .bind(buyer_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Inquiries on listings owned by `creator_id`, newest first
    pub async fn find_for_creator(
        creator_id: UserId,
        pool: &PgPool,
    ) -> Result<Vec<InquiryWithListing>> {
        sqlx::query_as::<_, InquiryWithListing>(
            r#"
            SELECT i.*, l.title AS listing_title
            FROM inquiries i
            JOIN ip_listings l ON l.id = i.listing_id
            WHERE l.creator_id = $1
            ORDER BY i.created_at DESC
            "#,
        )
        .bind(creator_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_all_with_listing(pool: &PgPool) -> Result<Vec<InquiryWithListing>> {
        sqlx::query_as::<_, InquiryWithListing>(
            r#"
            SELECT i.*, l.title AS listing_title
            FROM inquiries i
            JOIN ip_listings l ON l.id = i.listing_id
            ORDER BY i.created_at DESC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn set_status(
        id: InquiryId,
        status: InquiryStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("UPDATE inquiries SET status = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(status.to_string())
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn count(pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM inquiries")
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }
}
