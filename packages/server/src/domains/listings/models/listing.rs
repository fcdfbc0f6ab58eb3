use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::utils::escape_like;
use crate::common::{ListingId, UserId};
use crate::domains::listings::data::{CreateListingRequest, UpdateListingRequest};

/// IP listing - a creator's property offered to buyers
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Listing {
    pub id: ListingId,
    pub creator_id: UserId,
    pub slug: String,

    // Content
    pub title: String,
    pub tagline: Option<String>,
    pub description: String,
    pub genre: String,
    pub format: String, // 'Series', 'Film', 'Limited Series', 'Short', ...
    pub tier: String,   // 'flagship', 'strong', 'hidden-gem'

    // Setting & context
    pub period: Option<String>,
    pub location: Option<String>,
    pub world_type: Option<String>,
    pub themes: Vec<String>,
    pub target_audience: Option<String>,

    // Market
    pub comparables: Vec<String>,
    pub logline: Option<String>,

    // Rights
    pub rights_holder: Option<String>,
    pub rights_holder_contact: Option<String>,
    pub available_rights: Vec<String>,
    pub available_territories: Vec<String>,

    // Files (public object-store URLs)
    pub script_url: Option<String>,
    pub synopsis_url: Option<String>,
    pub poster_url: Option<String>,
    pub concept_art_urls: Vec<String>,

    // AI analysis summary
    pub ai_analysis_status: String, // 'pending', 'analyzing', 'ready', 'failed'
    pub ai_score: Option<f64>,
    pub ai_strengths: Vec<String>,
    pub ai_improvements: Vec<String>,

    pub status: String, // 'draft', 'pending', 'published', 'archived'
    pub featured: bool,

    pub view_count: i32,
    pub save_count: i32,
    pub inquiry_count: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Enums
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    Pending,
    Published,
    Archived,
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingStatus::Draft => write!(f, "draft"),
            ListingStatus::Pending => write!(f, "pending"),
            ListingStatus::Published => write!(f, "published"),
            ListingStatus::Archived => write!(f, "archived"),
        }
    }
}

impl std::str::FromStr for ListingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "draft" => Ok(ListingStatus::Draft),
            "pending" => Ok(ListingStatus::Pending),
            "published" => Ok(ListingStatus::Published),
            "archived" => Ok(ListingStatus::Archived),
            _ => Err(anyhow::anyhow!("Invalid listing status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ListingTier {
    Flagship,
    Strong,
    #[default]
    HiddenGem,
}

impl std::fmt::Display for ListingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListingTier::Flagship => write!(f, "flagship"),
            ListingTier::Strong => write!(f, "strong"),
            ListingTier::HiddenGem => write!(f, "hidden-gem"),
        }
    }
}

impl std::str::FromStr for ListingTier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flagship" => Ok(ListingTier::Flagship),
            "strong" => Ok(ListingTier::Strong),
            "hidden-gem" => Ok(ListingTier::HiddenGem),
            _ => Err(anyhow::anyhow!("Invalid listing tier: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Pending,
    Analyzing,
    Ready,
    Failed,
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisStatus::Pending => write!(f, "pending"),
            AnalysisStatus::Analyzing => write!(f, "analyzing"),
            AnalysisStatus::Ready => write!(f, "ready"),
            AnalysisStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for AnalysisStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(AnalysisStatus::Pending),
            "analyzing" => Ok(AnalysisStatus::Analyzing),
            "ready" => Ok(AnalysisStatus::Ready),
            "failed" => Ok(AnalysisStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid analysis status: {}", s)),
        }
    }
}

/// Sortable columns for the public catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingSort {
    #[default]
    CreatedAt,
    ViewCount,
    SaveCount,
    Title,
}

impl ListingSort {
    fn column(self) -> &'static str {
        match self {
            ListingSort::CreatedAt => "created_at",
            ListingSort::ViewCount => "view_count",
            ListingSort::SaveCount => "save_count",
            ListingSort::Title => "title",
        }
    }
}

impl std::str::FromStr for ListingSort {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "created_at" => Ok(ListingSort::CreatedAt),
            "view_count" => Ok(ListingSort::ViewCount),
            "save_count" => Ok(ListingSort::SaveCount),
            "title" => Ok(ListingSort::Title),
            _ => Err(anyhow::anyhow!("Invalid sort column: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(anyhow::anyhow!("Invalid sort order: {}", s)),
        }
    }
}

/// Catalogue filter; `None` fields match everything
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub status: Option<ListingStatus>,
    pub genre: Option<String>,
    pub tier: Option<String>,
    pub search: Option<String>,
    pub sort: ListingSort,
    pub order: SortOrder,
}

impl ListingFilter {
    /// ILIKE pattern for the free-text search, wildcards escaped
    fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

// =============================================================================
// Queries
// =============================================================================

impl Listing {
    pub fn is_analyzing(&self) -> bool {
        self.ai_analysis_status == AnalysisStatus::Analyzing.to_string()
    }

    /// Insert a new draft listing (status and analysis status take column defaults)
    pub async fn create(
        creator_id: UserId,
        slug: &str,
        tier: ListingTier,
        input: &CreateListingRequest,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO ip_listings (
                creator_id, slug, title, tagline, description, genre, format, tier,
                period, location, world_type, themes, target_audience,
                comparables, logline,
                rights_holder, rights_holder_contact, available_rights, available_territories
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(creator_id)
        .bind(slug)
        .bind(input.title.trim())
        .bind(&input.tagline)
        .bind(&input.description)
        .bind(&input.genre)
        .bind(&input.format)
        .bind(tier.to_string())
        .bind(&input.period)
        .bind(&input.location)
        .bind(&input.world_type)
        .bind(&input.themes)
        .bind(&input.target_audience)
        .bind(&input.comparables)
        .bind(&input.logline)
        .bind(&input.rights_holder)
        .bind(&input.rights_holder_contact)
        .bind(&input.available_rights)
        .bind(&input.available_territories)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: ListingId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM ip_listings WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_published_by_id(id: ListingId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM ip_listings WHERE id = $1 AND status = 'published'",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Count a view on a published listing and return it
    pub async fn record_view_by_id(id: ListingId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE ip_listings SET view_count = view_count + 1
            WHERE id = $1 AND status = 'published'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Count a view on a published listing, addressed by slug
    pub async fn record_view_by_slug(slug: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE ip_listings SET view_count = view_count + 1
            WHERE slug = $1 AND status = 'published'
            RETURNING *
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Filtered, sorted catalogue page
    pub async fn search(
        filter: &ListingFilter,
        limit: i64,
        offset: i64,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        let query = format!(
            r#"
            SELECT * FROM ip_listings
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR genre = $2)
              AND ($3::text IS NULL OR tier = $3)
              AND ($4::text IS NULL OR title ILIKE $4 OR description ILIKE $4)
            ORDER BY {} {}, id
            LIMIT $5 OFFSET $6
            "#,
            filter.sort.column(),
            filter.order.keyword()
        );

        sqlx::query_as::<_, Self>(&query)
            .bind(filter.status.map(|s| s.to_string()))
            .bind(&filter.genre)
            .bind(&filter.tier)
            .bind(filter.search_pattern())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Published + featured listings, best AI score first
    pub async fn find_featured(limit: i64, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM ip_listings
            WHERE status = 'published' AND featured = TRUE
            ORDER BY ai_score DESC NULLS LAST, created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_creator(creator_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM ip_listings WHERE creator_id = $1 ORDER BY created_at DESC",
        )
        .bind(creator_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Every listing regardless of visibility (admin moderation queue)
    pub async fn find_all(status: Option<ListingStatus>, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM ip_listings
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(status.map(|s| s.to_string()))
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Published listings the buyer has saved, most recently saved first
    pub async fn find_saved_by(buyer_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT l.* FROM ip_listings l
            JOIN favorites f ON f.listing_id = l.id
            WHERE f.buyer_id = $1 AND l.status = 'published'
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(buyer_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Apply the provided fields; `None` leaves a column untouched
    pub async fn update(
        id: ListingId,
        changes: &UpdateListingRequest,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE ip_listings SET
                title = COALESCE($2, title),
                tagline = COALESCE($3, tagline),
                description = COALESCE($4, description),
                genre = COALESCE($5, genre),
                format = COALESCE($6, format),
                tier = COALESCE($7, tier),
                period = COALESCE($8, period),
                location = COALESCE($9, location),
                world_type = COALESCE($10, world_type),
                themes = COALESCE($11, themes),
                target_audience = COALESCE($12, target_audience),
                comparables = COALESCE($13, comparables),
                logline = COALESCE($14, logline),
                rights_holder = COALESCE($15, rights_holder),
                rights_holder_contact = COALESCE($16, rights_holder_contact),
                available_rights = COALESCE($17, available_rights),
                available_territories = COALESCE($18, available_territories),
                status = COALESCE($19, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.tagline)
        .bind(&changes.description)
        .bind(&changes.genre)
        .bind(&changes.format)
        .bind(&changes.tier)
        .bind(&changes.period)
        .bind(&changes.location)
        .bind(&changes.world_type)
        .bind(&changes.themes)
        .bind(&changes.target_audience)
        .bind(&changes.comparables)
        .bind(&changes.logline)
        .bind(&changes.rights_holder)
        .bind(&changes.rights_holder_contact)
        .bind(&changes.available_rights)
        .bind(&changes.available_territories)
        .bind(&changes.status)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn set_status(
        id: ListingId,
        status: ListingStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE ip_listings SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status.to_string())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn set_featured(id: ListingId, featured: bool, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE ip_listings SET featured = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(featured)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Returns true if a row was deleted (materials, inquiries and favorites cascade)
    pub async fn delete(id: ListingId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM ip_listings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -------------------------------------------------------------------------
    // File URLs
    // -------------------------------------------------------------------------

    pub async fn set_script_url(
        id: ListingId,
        url: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE ip_listings SET script_url = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(url)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn set_poster_url(
        id: ListingId,
        url: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE ip_listings SET poster_url = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(url)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn add_concept_art_url(
        id: ListingId,
        url: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE ip_listings
            SET concept_art_urls = array_append(concept_art_urls, $2), updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(url)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    // -------------------------------------------------------------------------
    // Counters (single-statement increments)
    // -------------------------------------------------------------------------

    pub async fn increment_save_count(id: ListingId, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE ip_listings SET save_count = save_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Never drops below zero
    pub async fn decrement_save_count(id: ListingId, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "UPDATE ip_listings SET save_count = GREATEST(save_count - 1, 0) WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn increment_inquiry_count(id: ListingId, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE ip_listings SET inquiry_count = inquiry_count + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Analysis status
    // -------------------------------------------------------------------------

    /// Move to `analyzing` unless already there.
    ///
    /// Returns `None` when the listing is absent or an analysis is running,
    /// so only one caller ever wins the transition.
    pub async fn try_start_analysis(id: ListingId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE ip_listings
            SET ai_analysis_status = 'analyzing', updated_at = NOW()
            WHERE id = $1 AND ai_analysis_status <> 'analyzing'
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn set_analysis_status(
        id: ListingId,
        status: AnalysisStatus,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE ip_listings SET ai_analysis_status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(status.to_string())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Store the analysis summary and mark the listing `ready`
    pub async fn complete_analysis(
        id: ListingId,
        score: Option<f64>,
        strengths: &[String],
        improvements: &[String],
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE ip_listings SET
                ai_analysis_status = 'ready',
                ai_score = $2,
                ai_strengths = $3,
                ai_improvements = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(score)
        .bind(strengths)
        .bind(improvements)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// (status, count) pairs
    pub async fn count_by_status(pool: &PgPool) -> Result<Vec<(String, i64)>> {
        sqlx::query_as::<_, (String, i64)>(
            "SELECT status, COUNT(*) FROM ip_listings GROUP BY status ORDER BY status",
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
