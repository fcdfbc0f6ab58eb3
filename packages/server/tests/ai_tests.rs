//! Integration tests for the analysis pipeline and generated materials.

mod common;

use axum::http::StatusCode;
use common::{create_test_listing, create_test_user, TestHarness};
use serde_json::{json, Value};
use server_core::common::ListingId;
use server_core::domains::ai::pipeline::run_analysis;
use server_core::domains::listings::Listing;
use server_core::kernel::{MockAI, TestDependencies};
use test_context::test_context;

/// Poll until the pipeline leaves `analyzing`
async fn wait_for_analysis(ctx: &TestHarness, listing_id: ListingId) -> Listing {
    for _ in 0..50 {
        ctx.settle().await;
        let listing = Listing::find_by_id(listing_id, &ctx.db_pool)
            .await
            .unwrap()
            .unwrap();
        if !listing.is_analyzing() {
            return listing;
        }
    }
    panic!("analysis did not finish");
}

fn harness_with_ai(ctx: &TestHarness, ai: MockAI) -> TestHarness {
    TestHarness::with_deps(ctx.db_pool.clone(), TestDependencies::new().mock_ai(ai))
}

#[test_context(TestHarness)]
#[tokio::test]
async fn analysis_stores_material_and_summary(ctx: &TestHarness) {
    let reply = json!({
        "executive_summary": "A taut chamber piece.",
        "commercial_score": 8.5,
        "strengths": ["Atmosphere", "Two-hander"],
        "improvements": ["Slow second act"],
        "comparables": [{"title": "The Lighthouse", "reason": "Setting"}]
    });
    let ctx = harness_with_ai(ctx, MockAI::new().with_json_response(&reply));
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let token = ctx.token_for(creator.id);
    let listing = create_test_listing(&ctx.db_pool, &creator, "Beacon")
        .await
        .unwrap();
    let base = format!("/api/ai/listings/{}", listing.id);

    let (status, started) = ctx.post(&format!("{}/analyze", base), Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(started["status"], "analyzing");
    assert_eq!(
        started["message"],
        "Analysis started for 'Beacon'. This takes 30-60 seconds."
    );

    let done = wait_for_analysis(&ctx, listing.id).await;
    assert_eq!(done.ai_analysis_status, "ready");
    assert_eq!(done.ai_score, Some(8.5));
    assert_eq!(done.ai_strengths, vec!["Atmosphere", "Two-hander"]);
    assert_eq!(done.ai_improvements, vec!["Slow second act"]);

    // No script uploaded, so the prompt was built from listing metadata
    assert!(ctx.deps.ai.was_called_with("Title: Beacon"));

    let (status, analysis) = ctx.get(&format!("{}/analysis", base), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(analysis["status"], "ready");
    assert_eq!(analysis["message"], "Status: ready");
    assert_eq!(analysis["analysis"]["executive_summary"], "A taut chamber piece.");
    assert_eq!(analysis["analysis"]["model_used"], "mock-model");
    assert_eq!(analysis["analysis"]["tokens_used"], 42);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unparsable_reply_uses_fallback_analysis(ctx: &TestHarness) {
    let ctx = harness_with_ai(ctx, MockAI::new().with_response("Honestly, it's pretty good."));
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let listing = create_test_listing(&ctx.db_pool, &creator, "Vague")
        .await
        .unwrap();

    ctx.post(
        &format!("/api/ai/listings/{}/analyze", listing.id),
        Some(&ctx.token_for(creator.id)),
        json!({}),
    )
    .await;

    let done = wait_for_analysis(&ctx, listing.id).await;
    assert_eq!(done.ai_analysis_status, "ready");
    assert_eq!(done.ai_score, Some(7.0));
    assert_eq!(done.ai_strengths.len(), 3);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn model_failure_marks_analysis_failed(ctx: &TestHarness) {
    let ctx = harness_with_ai(ctx, MockAI::new().failing());
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let listing = create_test_listing(&ctx.db_pool, &creator, "Doomed")
        .await
        .unwrap();

    ctx.post(
        &format!("/api/ai/listings/{}/analyze", listing.id),
        Some(&ctx.token_for(creator.id)),
        json!({}),
    )
    .await;

    let done = wait_for_analysis(&ctx, listing.id).await;
    assert_eq!(done.ai_analysis_status, "failed");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn listing_load_failure_marks_analysis_failed(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let listing = create_test_listing(&ctx.db_pool, &creator, "Unreadable")
        .await
        .unwrap();
    Listing::try_start_analysis(listing.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();

    // Can record the outcome but cannot read the listing row
    sqlx::raw_sql(
        "DO $$ BEGIN CREATE ROLE analysis_writer LOGIN PASSWORD 'writer'; \
         EXCEPTION WHEN duplicate_object THEN NULL; END $$; \
         GRANT SELECT (id), UPDATE (ai_analysis_status, updated_at) \
         ON ip_listings TO analysis_writer;",
    )
    .execute(&ctx.db_pool)
    .await
    .unwrap();
    let writer_pool = ctx.connect_as("analysis_writer", "writer").await.unwrap();

    let deps = TestDependencies::new();
    run_analysis(listing.id, deps.clone().into_server_deps(writer_pool)).await;

    let stored = Listing::find_by_id(listing.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.ai_analysis_status, "failed");
    assert_eq!(deps.ai.call_count(), 0);

    // No longer stuck: a new analysis can start
    let (status, body) = ctx
        .post(
            &format!("/api/ai/listings/{}/analyze", listing.id),
            Some(&ctx.token_for(creator.id)),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["message"], "Analysis already in progress");
    wait_for_analysis(ctx, listing.id).await;
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unreadable_script_falls_back_to_metadata(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let token = ctx.token_for(creator.id);
    let listing = create_test_listing(&ctx.db_pool, &creator, "Broken Reel")
        .await
        .unwrap();
    let listing_id = listing.id.to_string();

    let (status, _) = ctx
        .upload(
            "/api/files/upload",
            &token,
            &[("listing_id", &listing_id), ("file_type", "script")],
            ("pilot.pdf", "application/pdf", b"%PDF-1.4 not actually a document"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    ctx.post(
        &format!("/api/ai/listings/{}/analyze", listing.id),
        Some(&token),
        json!({}),
    )
    .await;

    let done = wait_for_analysis(ctx, listing.id).await;
    assert_eq!(done.ai_analysis_status, "ready");
    assert_eq!(
        ctx.deps.storage.downloads(),
        vec![format!("{}/{}/script.pdf", creator.id, listing.id)]
    );
    assert!(ctx.deps.ai.was_called_with("Title: Broken Reel"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn script_outside_bucket_falls_back_to_metadata(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let listing = create_test_listing(&ctx.db_pool, &creator, "Offsite Draft")
        .await
        .unwrap();
    sqlx::query("UPDATE ip_listings SET script_url = $2 WHERE id = $1")
        .bind(listing.id)
        .bind("https://cdn.example.com/scripts/offsite.pdf")
        .execute(&ctx.db_pool)
        .await
        .unwrap();

    ctx.post(
        &format!("/api/ai/listings/{}/analyze", listing.id),
        Some(&ctx.token_for(creator.id)),
        json!({}),
    )
    .await;

    let done = wait_for_analysis(ctx, listing.id).await;
    assert_eq!(done.ai_analysis_status, "ready");
    assert!(ctx.deps.storage.downloads().is_empty());
    assert!(ctx.deps.ai.was_called_with("Title: Offsite Draft"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn analysis_already_in_progress_is_not_restarted(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let listing = create_test_listing(&ctx.db_pool, &creator, "Busy")
        .await
        .unwrap();
    sqlx::query("UPDATE ip_listings SET ai_analysis_status = 'analyzing' WHERE id = $1")
        .bind(listing.id)
        .execute(&ctx.db_pool)
        .await
        .unwrap();

    let (status, body) = ctx
        .post(
            &format!("/api/ai/listings/{}/analyze", listing.id),
            Some(&ctx.token_for(creator.id)),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Analysis already in progress");
    assert_eq!(ctx.deps.ai.call_count(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn analyze_requires_owner_or_admin(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let listing = create_test_listing(&ctx.db_pool, &creator, "Private")
        .await
        .unwrap();
    let other = create_test_user(&ctx.db_pool, "buyer").await.unwrap();

    let (status, _) = ctx
        .post(
            &format!("/api/ai/listings/{}/analyze", listing.id),
            Some(&ctx.token_for(other.id)),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .post(
            &format!("/api/ai/listings/{}/analyze", ListingId::new()),
            Some(&ctx.token_for(other.id)),
            json!({}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn one_pager_and_pitch_deck_generation(ctx: &TestHarness) {
    let deck = json!([{"slide_number": 1, "title": "Hook", "key_points": ["Fog"], "visual_suggestion": "Beam"}]);
    let ctx = harness_with_ai(
        ctx,
        MockAI::new()
            .with_response("# Beacon\n\n**Logline:** Light lies.")
            .with_json_response(&deck),
    );
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let token = ctx.token_for(creator.id);
    let listing = create_test_listing(&ctx.db_pool, &creator, "Beacon Materials")
        .await
        .unwrap();
    let base = format!("/api/ai/listings/{}", listing.id);

    let (status, _) = ctx.get(&format!("{}/onepager", base), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, generated) = ctx
        .post(&format!("{}/generate-onepager", base), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(generated["one_pager"], "# Beacon\n\n**Logline:** Light lies.");

    let (status, fetched) = ctx.get(&format!("{}/onepager", base), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["one_pager"], generated["one_pager"]);

    let (status, generated) = ctx
        .post(&format!("{}/generate-pitch-deck", base), Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(generated["pitch_deck"]["slides"][0]["title"], "Hook");

    let (status, fetched) = ctx.get(&format!("{}/pitch-deck", base), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    let slides: &Value = &fetched["pitch_deck"]["slides"];
    assert_eq!(slides.as_array().map(Vec::len), Some(1));

    let calls = ctx.deps.ai.calls();
    assert_eq!(calls[0].max_tokens, 2048);
    assert!((calls[0].temperature - 0.8).abs() < f32::EPSILON);
}
