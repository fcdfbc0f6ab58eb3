use anyhow::Context;
use serde_json::Value;
use tracing::info;

use crate::common::{ApiError, ApiResult, ListingId};
use crate::domains::ai::data::{OnePagerResponse, PitchDeckResponse};
use crate::domains::ai::models::{IpMaterial, MaterialType, NewMaterial};
use crate::domains::ai::parsing::parse_pitch_deck;
use crate::domains::ai::prompts::{one_pager_prompt, pitch_deck_prompt};
use crate::domains::listings::actions::find_managed_listing;
use crate::domains::users::User;
use crate::kernel::{CompletionRequest, ServerDeps};

use super::latest_analysis;

pub async fn generate_one_pager(
    user: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<OnePagerResponse> {
    let listing = find_managed_listing(user, listing_id, deps).await?;
    let analysis = latest_analysis(listing_id, deps).await?;

    let completion = deps
        .ai
        .complete(
            CompletionRequest::new(one_pager_prompt(&listing, analysis.as_ref()))
                .max_tokens(2048)
                .temperature(0.8),
        )
        .await
        .context("One-pager generation failed")?;

    IpMaterial::create(
        &NewMaterial {
            listing_id,
            material_type: MaterialType::OnePager,
            content: Value::String(completion.text.clone()),
            markdown_content: Some(completion.text.clone()),
            model_used: Some(completion.model),
            tokens_used: i32::try_from(completion.tokens_used).ok(),
        },
        &deps.db_pool,
    )
    .await?;

    info!(listing_id = %listing_id, "One-pager generated");
    Ok(OnePagerResponse {
        listing_id,
        one_pager: completion.text,
        message: "One-pager generated successfully".to_string(),
    })
}

pub async fn get_one_pager(listing_id: ListingId, deps: &ServerDeps) -> ApiResult<OnePagerResponse> {
    let material = IpMaterial::find_latest(listing_id, MaterialType::OnePager, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("No one-pager found"))?;

    Ok(OnePagerResponse {
        listing_id,
        one_pager: material.markdown().unwrap_or_default().to_string(),
        message: "One-pager retrieved successfully".to_string(),
    })
}

pub async fn generate_pitch_deck(
    user: &User,
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<PitchDeckResponse> {
    let listing = find_managed_listing(user, listing_id, deps).await?;
    let analysis = latest_analysis(listing_id, deps).await?;

    let completion = deps
        .ai
        .complete(
            CompletionRequest::new(pitch_deck_prompt(&listing, analysis.as_ref()))
                .max_tokens(2048)
                .temperature(0.7),
        )
        .await
        .context("Pitch deck generation failed")?;

    let deck = parse_pitch_deck(&completion.text);
    IpMaterial::create(
        &NewMaterial {
            listing_id,
            material_type: MaterialType::PitchDeck,
            content: deck.clone(),
            markdown_content: None,
            model_used: Some(completion.model),
            tokens_used: i32::try_from(completion.tokens_used).ok(),
        },
        &deps.db_pool,
    )
    .await?;

    info!(listing_id = %listing_id, "Pitch deck generated");
    Ok(PitchDeckResponse {
        listing_id,
        pitch_deck: deck,
        message: "Pitch deck generated successfully".to_string(),
    })
}

pub async fn get_pitch_deck(
    listing_id: ListingId,
    deps: &ServerDeps,
) -> ApiResult<PitchDeckResponse> {
    let material = IpMaterial::find_latest(listing_id, MaterialType::PitchDeck, &deps.db_pool)
        .await?
        .ok_or_else(|| ApiError::not_found("No pitch deck found"))?;

    Ok(PitchDeckResponse {
        listing_id,
        pitch_deck: material.content,
        message: "Pitch deck retrieved successfully".to_string(),
    })
}
