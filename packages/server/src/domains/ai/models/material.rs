use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::{ListingId, MaterialId};

/// AI-generated artefact attached to a listing
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct IpMaterial {
    pub id: MaterialId,
    pub listing_id: ListingId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub material_type: String, // 'analysis', 'one_pager', 'pitch_deck', 'mood_board'
    pub content: serde_json::Value,
    pub markdown_content: Option<String>,
    pub pdf_url: Option<String>,
    pub model_used: Option<String>,
    pub tokens_used: Option<i32>,
    pub cost_usd: Option<f64>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Analysis,
    OnePager,
    PitchDeck,
    MoodBoard,
}

impl std::fmt::Display for MaterialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaterialType::Analysis => write!(f, "analysis"),
            MaterialType::OnePager => write!(f, "one_pager"),
            MaterialType::PitchDeck => write!(f, "pitch_deck"),
            MaterialType::MoodBoard => write!(f, "mood_board"),
        }
    }
}

impl std::str::FromStr for MaterialType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "analysis" => Ok(MaterialType::Analysis),
            "one_pager" => Ok(MaterialType::OnePager),
            "pitch_deck" => Ok(MaterialType::PitchDeck),
            "mood_board" => Ok(MaterialType::MoodBoard),
            _ => Err(anyhow::anyhow!("Invalid material type: {}", s)),
        }
    }
}

/// Insert payload; `content` is stored as JSONB
#[derive(Debug, Clone)]
pub struct NewMaterial {
    pub listing_id: ListingId,
    pub material_type: MaterialType,
    pub content: serde_json::Value,
    pub markdown_content: Option<String>,
    pub model_used: Option<String>,
    pub tokens_used: Option<i32>,
}

impl IpMaterial {
    pub async fn create(material: &NewMaterial, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO ip_materials (listing_id, type, content, markdown_content, model_used, tokens_used)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(material.listing_id)
        .bind(material.material_type.to_string())
        .bind(&material.content)
        .bind(&material.markdown_content)
        .bind(&material.model_used)
        .bind(material.tokens_used)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Most recently generated material of a type
    pub async fn find_latest(
        listing_id: ListingId,
        material_type: MaterialType,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM ip_materials
            WHERE listing_id = $1 AND type = $2
            ORDER BY generated_at DESC
            LIMIT 1
            "#,
        )
        .bind(listing_id)
        .bind(material_type.to_string())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Markdown body, whichever column it was stored in
    pub fn markdown(&self) -> Option<&str> {
        self.markdown_content
            .as_deref()
            .or_else(|| self.content.as_str())
    }
}
