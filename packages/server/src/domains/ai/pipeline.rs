//! Background listing analysis.
//!
//! One spawned task per request, best effort: any failure, including not
//! being able to load the listing, leaves it `failed`. No retries.

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::common::ListingId;
use crate::domains::listings::{AnalysisStatus, Listing};
use crate::kernel::pdf::extract_pdf_text;
use crate::kernel::{CompletionRequest, ServerDeps};

use super::models::{IpMaterial, MaterialType, NewMaterial};
use super::parsing::{commercial_score, parse_analysis, string_list};
use super::prompts::{analysis_prompt, listing_metadata_text};

/// Characters of PDF text kept from an uploaded script.
pub const MAX_SCRIPT_CHARS: usize = 60_000;

/// Run the analysis for a listing, recording the outcome on the listing row.
pub async fn run_analysis(listing_id: ListingId, deps: ServerDeps) {
    let listing = match Listing::find_by_id(listing_id, &deps.db_pool).await {
        Ok(Some(listing)) => listing,
        Ok(None) => {
            error!(listing_id = %listing_id, "Listing not found for analysis");
            return;
        }
        Err(e) => {
            error!(listing_id = %listing_id, error = %e, "Failed to load listing for analysis");
            mark_failed(listing_id, &deps).await;
            return;
        }
    };

    if let Err(e) = analyze(&listing, &deps).await {
        error!(listing_id = %listing_id, error = %e, "Analysis failed");
        mark_failed(listing_id, &deps).await;
    }
}

async fn mark_failed(listing_id: ListingId, deps: &ServerDeps) {
    if let Err(e) =
        Listing::set_analysis_status(listing_id, AnalysisStatus::Failed, &deps.db_pool).await
    {
        error!(listing_id = %listing_id, error = %e, "Failed to mark analysis as failed");
    }
}

async fn analyze(listing: &Listing, deps: &ServerDeps) -> Result<()> {
    Listing::set_analysis_status(listing.id, AnalysisStatus::Analyzing, &deps.db_pool).await?;

    let text = match script_text(listing, deps).await {
        Some(text) => {
            info!(listing_id = %listing.id, chars = text.chars().count(), "Using script PDF for analysis");
            text
        }
        None => {
            info!(listing_id = %listing.id, "No readable script, using listing metadata for analysis");
            listing_metadata_text(listing)
        }
    };

    let completion = deps
        .ai
        .complete(
            CompletionRequest::new(analysis_prompt(listing, &text))
                .max_tokens(4096)
                .temperature(0.7),
        )
        .await
        .context("Model call failed")?;

    let mut analysis = parse_analysis(&completion.text);
    if let Some(obj) = analysis.as_object_mut() {
        obj.insert("tokens_used".into(), completion.tokens_used.into());
        obj.insert("model_used".into(), completion.model.clone().into());
    }

    let score = commercial_score(&analysis);
    let strengths = string_list(&analysis, "strengths");
    let improvements = string_list(&analysis, "improvements");

    IpMaterial::create(
        &NewMaterial {
            listing_id: listing.id,
            material_type: MaterialType::Analysis,
            content: analysis,
            markdown_content: None,
            model_used: Some(completion.model),
            tokens_used: i32::try_from(completion.tokens_used).ok(),
        },
        &deps.db_pool,
    )
    .await?;

    Listing::complete_analysis(listing.id, score, &strengths, &improvements, &deps.db_pool)
        .await?;

    info!(listing_id = %listing.id, score = ?score, "Analysis saved");
    Ok(())
}

/// Text of the listing's script PDF, if it lives in our bucket and is readable.
async fn script_text(listing: &Listing, deps: &ServerDeps) -> Option<String> {
    let url = listing.script_url.as_deref()?;
    let Some(path) = deps.storage.path_from_url(url) else {
        warn!(listing_id = %listing.id, "Script URL is outside the storage bucket");
        return None;
    };

    let bytes = match deps.storage.download(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(listing_id = %listing.id, error = %e, "Could not download script");
            return None;
        }
    };

    let extracted =
        tokio::task::spawn_blocking(move || extract_pdf_text(&bytes, MAX_SCRIPT_CHARS)).await;

    match extracted {
        Ok(Ok(text)) if !text.trim().is_empty() => Some(text),
        Ok(Ok(_)) => {
            warn!(listing_id = %listing.id, "Script PDF has no text layer");
            None
        }
        Ok(Err(e)) => {
            warn!(listing_id = %listing.id, error = %e, "Could not read script PDF");
            None
        }
        Err(e) => {
            warn!(listing_id = %listing.id, error = %e, "PDF extraction task failed");
            None
        }
    }
}
