use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ListingId, UserId};

/// A saved listing, one row per (buyer, listing)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Favorite {
    pub buyer_id: UserId,
    pub listing_id: ListingId,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    /// Returns true if a new row was inserted
    pub async fn add(buyer_id: UserId, listing_id: ListingId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO favorites (buyer_id, listing_id)
            VALUES ($1, $2)
            ON CONFLICT (buyer_id, listing_id) DO NOTHING
            "#,
        )
        .bind(buyer_id)
        .bind(listing_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns true if a row was removed
    pub async fn remove(buyer_id: UserId, listing_id: ListingId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM favorites WHERE buyer_id = $1 AND listing_id = $2")
            .bind(buyer_id)
            .bind(listing_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Saved listing ids, most recent first
    pub async fn listing_ids_for(buyer_id: UserId, pool: &PgPool) -> Result<Vec<ListingId>> {
        sqlx::query_scalar::<_, ListingId>(
            "SELECT listing_id FROM favorites WHERE buyer_id = $1 ORDER BY created_at DESC",
        )
        .bind(buyer_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
