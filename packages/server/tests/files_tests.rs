//! Integration tests for listing file uploads and protected access.

mod common;

use axum::http::StatusCode;
use common::{create_published_listing, create_test_listing, create_test_user, TestHarness};
use serde_json::json;
use server_core::domains::listings::Listing;
use server_core::kernel::BaseObjectStorage;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn script_upload_sets_listing_url(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let token = ctx.token_for(creator.id);
    let listing = create_test_listing(&ctx.db_pool, &creator, "Uploadable")
        .await
        .unwrap();
    let listing_id = listing.id.to_string();

    let (status, body) = ctx
        .upload(
            "/api/files/upload",
            &token,
            &[("listing_id", &listing_id), ("file_type", "script")],
            ("Draft 3.PDF", "application/pdf", b"%PDF-1.4 fake"),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let expected_path = format!("{}/{}/script.pdf", creator.id, listing.id);
    assert_eq!(body["path"], expected_path);
    assert_eq!(body["type"], "script");
    assert!(ctx.deps.storage.contains(&expected_path));
    assert_eq!(
        ctx.deps.storage.content_type_of(&expected_path).as_deref(),
        Some("application/pdf")
    );

    let stored = Listing::find_by_id(listing.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(stored.script_url.as_deref(), body["url"].as_str());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn concept_art_accumulates(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let token = ctx.token_for(creator.id);
    let listing = create_test_listing(&ctx.db_pool, &creator, "Gallery")
        .await
        .unwrap();
    let listing_id = listing.id.to_string();

    for name in ["one.png", "two.webp"] {
        let (status, _) = ctx
            .upload(
                "/api/files/upload",
                &token,
                &[("listing_id", &listing_id), ("file_type", "concept_art")],
                (name, "image/png", b"img"),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let stored = Listing::find_by_id(listing.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(stored.concept_art_urls.len(), 2);
    assert_ne!(stored.concept_art_urls[0], stored.concept_art_urls[1]);

    let (status, files) = ctx
        .get(&format!("/api/files/{}", listing.id), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(files.as_array().unwrap().len(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn upload_rejects_wrong_extension_and_non_owner(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let listing = create_test_listing(&ctx.db_pool, &creator, "Guarded")
        .await
        .unwrap();
    let listing_id = listing.id.to_string();

    let (status, error) = ctx
        .upload(
            "/api/files/upload",
            &ctx.token_for(creator.id),
            &[("listing_id", &listing_id), ("file_type", "script")],
            ("script.docx", "application/octet-stream", b"doc"),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["detail"].as_str().unwrap().starts_with("File type .docx not allowed"));

    let other = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let (status, _) = ctx
        .upload(
            "/api/files/upload",
            &ctx.token_for(other.id),
            &[("listing_id", &listing_id), ("file_type", "poster")],
            ("poster.png", "image/png", b"img"),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let buyer = create_test_user(&ctx.db_pool, "buyer").await.unwrap();
    let (status, _) = ctx
        .upload(
            "/api/files/upload",
            &ctx.token_for(buyer.id),
            &[("listing_id", &listing_id), ("file_type", "poster")],
            ("poster.png", "image/png", b"img"),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn signed_urls_need_subscription(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let token = ctx.token_for(creator.id);
    let listing = create_published_listing(&ctx.db_pool, &creator, "Locked Script")
        .await
        .unwrap();
    let uri = format!("/api/files/{}/signed-url", listing.id);

    let (status, _) = ctx.post(&uri, Some(&token), json!({"file_type": "script"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let listing_id = listing.id.to_string();
    ctx.upload(
        "/api/files/upload",
        &token,
        &[("listing_id", &listing_id), ("file_type", "script")],
        ("script.pdf", "application/pdf", b"%PDF"),
    )
    .await;

    let (status, signed) = ctx.post(&uri, Some(&token), json!({"file_type": "script"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(signed["expires_in"], 3600);
    assert!(signed["signed_url"].as_str().unwrap().contains("script.pdf"));

    let (status, _) = ctx
        .post(&uri, Some(&token), json!({"file_type": "concept_art"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let buyer = create_test_user(&ctx.db_pool, "buyer").await.unwrap();
    let buyer_token = ctx.token_for(buyer.id);
    let (status, _) = ctx
        .post(&uri, Some(&buyer_token), json!({"file_type": "script"}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    sqlx::query("UPDATE users SET subscription_status = 'active' WHERE id = $1")
        .bind(buyer.id)
        .execute(&ctx.db_pool)
        .await
        .unwrap();
    let (status, _) = ctx
        .post(&uri, Some(&buyer_token), json!({"file_type": "script"}))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_file_clears_url(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let token = ctx.token_for(creator.id);
    let listing = create_test_listing(&ctx.db_pool, &creator, "Poster Child")
        .await
        .unwrap();
    let listing_id = listing.id.to_string();

    let (_, uploaded) = ctx
        .upload(
            "/api/files/upload",
            &token,
            &[("listing_id", &listing_id), ("file_type", "poster")],
            ("poster.jpg", "image/jpeg", b"jpg"),
        )
        .await;
    let path = uploaded["path"].as_str().unwrap().to_string();

    let uri = format!("/api/files/{}/file", listing.id);
    let (status, body) = ctx
        .send(
            axum::http::Method::DELETE,
            &uri,
            Some(&token),
            Some(json!({"file_type": "poster"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "poster file deleted successfully");
    assert!(!ctx.deps.storage.contains(&path));

    let stored = Listing::find_by_id(listing.id, &ctx.db_pool).await.unwrap().unwrap();
    assert!(stored.poster_url.is_none());

    let (status, _) = ctx
        .send(
            axum::http::Method::DELETE,
            &uri,
            Some(&token),
            Some(json!({"file_type": "poster"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn replacing_poster_removes_previous_object(ctx: &TestHarness) {
    let creator = create_test_user(&ctx.db_pool, "creator").await.unwrap();
    let token = ctx.token_for(creator.id);
    let listing = create_test_listing(&ctx.db_pool, &creator, "Repainted")
        .await
        .unwrap();
    let listing_id = listing.id.to_string();
    let fields = [("listing_id", listing_id.as_str()), ("file_type", "poster")];
    let jpg_path = format!("{}/{}/poster.jpg", creator.id, listing.id);
    let png_path = format!("{}/{}/poster.png", creator.id, listing.id);

    let (status, _) = ctx
        .upload("/api/files/upload", &token, &fields, ("one.jpg", "image/jpeg", b"jpg-bytes"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    // Same name overwrites in place, nothing to clean up
    let (status, _) = ctx
        .upload("/api/files/upload", &token, &fields, ("two.jpg", "image/jpeg", b"jpg-again"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(ctx.deps.storage.removed().is_empty());

    let (status, body) = ctx
        .upload("/api/files/upload", &token, &fields, ("three.png", "image/png", b"png-bytes"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["path"], png_path);

    assert!(ctx.deps.storage.contains(&png_path));
    assert!(!ctx.deps.storage.contains(&jpg_path));
    assert_eq!(ctx.deps.storage.removed(), vec![jpg_path]);

    let stored = Listing::find_by_id(listing.id, &ctx.db_pool).await.unwrap().unwrap();
    assert_eq!(stored.poster_url, Some(ctx.deps.storage.public_url(&png_path)));
}
