//! Integration tests for the garden action and view endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Garden
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fresh_garden_is_seeded() {
    let app = build_test_app().await;

    let response = get(&app.router, "/api/v1/garden").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["plots"].as_array().unwrap().len(), 6);
    assert_eq!(json["data"]["profiles"].as_array().unwrap().len(), 5);
    assert_eq!(json["data"]["deployments"], json!([]));
}

#[tokio::test]
async fn seed_defaults_reports_restored_profiles() {
    let app = build_test_app().await;
    let response = delete(&app.router, "/api/v1/profiles/koriandr").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let json = body_json(post_json(&app.router, "/api/v1/seed-defaults", json!({})).await).await;
    assert_eq!(json["data"]["profiles_added"], json!(["koriandr"]));
    assert_eq!(json["data"]["plots_added"], json!([]));
}

// ---------------------------------------------------------------------------
// Plots
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_plot_is_idempotent() {
    let app = build_test_app().await;

    let first = post_json(&app.router, "/api/v1/plots", json!({"plot_id": "B1", "label": "Shelf"})).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["data"]["label"], "Shelf");

    let second = post_json(&app.router, "/api/v1/plots", json!({"plot_id": "B1", "label": "Other"})).await;
    assert_eq!(body_json(second).await["data"]["label"], "Shelf");

    assert_eq!(app.engine.snapshot().await.plots.len(), 7);
}

#[tokio::test]
async fn add_plot_without_id_is_rejected() {
    let app = build_test_app().await;

    let response = post_json(&app.router, "/api/v1/plots", json!({"label": "Nameless"})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn plot_status_reports_idle_and_mature() {
    let app = build_test_app().await;
    post_json(
        &app.router,
        "/api/v1/plots/A1/deploy",
        json!({"profile_id": "rukola", "start_date": "2024-01-01"}),
    )
    .await;

    let a1 = body_json(get(&app.router, "/api/v1/plots/A1").await).await;
    assert_eq!(a1["data"]["phase"], "mature");
    assert_eq!(a1["data"]["plant_name"], "Rukola");
    assert_eq!(a1["data"]["harvest_date"], "2024-01-12");

    let a2 = body_json(get(&app.router, "/api/v1/plots/A2").await).await;
    assert_eq!(a2["data"]["phase"], "idle");
    assert_eq!(a2["data"]["plant_name"], serde_json::Value::Null);

    let all = body_json(get(&app.router, "/api/v1/plots").await).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn unknown_plot_status_is_404() {
    let app = build_test_app().await;
    let response = get(&app.router, "/api/v1/plots/Z9").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn rename_and_remove_plot() {
    let app = build_test_app().await;

    let renamed = put_json(&app.router, "/api/v1/plots/A3/label", json!({"label": "Kitchen"})).await;
    assert_eq!(body_json(renamed).await["data"]["label"], "Kitchen");

    post_json(
        &app.router,
        "/api/v1/plots/A3/deploy",
        json!({"profile_id": "hrasek", "start_date": "2024-02-01"}),
    )
    .await;
    let removed = delete(&app.router, "/api/v1/plots/A3").await;
    assert_eq!(removed.status(), StatusCode::NO_CONTENT);

    let garden = app.engine.snapshot().await;
    assert!(garden.plot("A3").is_none());
    assert!(garden.deployment_for("A3").is_none());
}

// ---------------------------------------------------------------------------
// Deployments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn deploy_computes_schedule() {
    let app = build_test_app().await;

    let response = post_json(
        &app.router,
        "/api/v1/plots/A1/deploy",
        json!({"profile_id": "rukola", "start_date": "2024-01-01", "sticker": "R-1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["cover_end"], "2024-01-04");
    assert_eq!(json["data"]["harvest_date"], "2024-01-12");
    assert_eq!(json["data"]["next_watering_due"], "2024-01-02");
    assert_eq!(json["data"]["sticker"], "R-1");
}

#[tokio::test]
async fn deploy_unknown_profile_is_404() {
    let app = build_test_app().await;
    let response = post_json(
        &app.router,
        "/api/v1/plots/A1/deploy",
        json!({"profile_id": "basil", "start_date": "2024-01-01"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deploy_bad_date_is_400() {
    let app = build_test_app().await;
    let response = post_json(
        &app.router,
        "/api/v1/plots/A1/deploy",
        json!({"profile_id": "rukola", "start_date": "tomorrow"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn shift_accepts_numeric_strings() {
    let app = build_test_app().await;
    post_json(
        &app.router,
        "/api/v1/plots/A1/deploy",
        json!({"profile_id": "rukola", "start_date": "2024-01-01"}),
    )
    .await;

    let earlier = body_json(post_json(&app.router, "/api/v1/plots/A1/shift", json!({"days": "-2"})).await).await;
    assert_eq!(earlier["data"]["start_date"], "2023-12-30");
    assert_eq!(earlier["data"]["harvest_date"], "2024-01-10");

    let restored = body_json(post_json(&app.router, "/api/v1/plots/A1/shift", json!({"days": 2})).await).await;
    assert_eq!(restored["data"]["start_date"], "2024-01-01");
    assert_eq!(restored["data"]["cover_end"], "2024-01-04");
}

#[tokio::test]
async fn shift_rejects_non_numeric_days() {
    let app = build_test_app().await;

    let bad = post_json(&app.router, "/api/v1/plots/A1/shift", json!({"days": "later"})).await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let missing = post_json(&app.router, "/api/v1/plots/A1/shift", json!({})).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn harvest_clears_and_is_idempotent() {
    let app = build_test_app().await;
    post_json(
        &app.router,
        "/api/v1/plots/A1/deploy",
        json!({"profile_id": "rukola", "start_date": "2024-01-01"}),
    )
    .await;

    let first = body_json(post_json(&app.router, "/api/v1/plots/A1/harvest", json!({})).await).await;
    assert_eq!(first["data"]["plant_id"], "rukola");

    let second = post_json(&app.router, "/api/v1/plots/A1/harvest", json!({})).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["data"], serde_json::Value::Null);

    let unassigned = post_json(&app.router, "/api/v1/plots/A1/unassign", json!({})).await;
    assert_eq!(unassigned.status(), StatusCode::OK);
}

#[tokio::test]
async fn storage_failure_returns_500_and_keeps_state() {
    let app = build_test_app().await;
    app.backend.set_fail_saves(true);

    let response = post_json(
        &app.router,
        "/api/v1/plots/A1/deploy",
        json!({"profile_id": "rukola", "start_date": "2024-01-01"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "STORAGE_ERROR");
    assert!(app.engine.snapshot().await.deployments.is_empty());
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[tokio::test]
async fn upsert_profile_coerces_numeric_strings() {
    let app = build_test_app().await;

    let response = post_json(
        &app.router,
        "/api/v1/profiles",
        json!({"id": "basil", "name": "Basil", "cover_days": "4", "uncover_days": 12, "watering_frequency_days": "2"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["data"]["cover_days"], 4);
    assert_eq!(json["data"]["watering_frequency_days"], 2);
    assert_eq!(json["data"]["notes"], "");
}

#[tokio::test]
async fn upsert_profile_requires_fields() {
    let app = build_test_app().await;

    let no_name = post_json(
        &app.router,
        "/api/v1/profiles",
        json!({"id": "basil", "cover_days": 1, "uncover_days": 1}),
    )
    .await;
    assert_eq!(no_name.status(), StatusCode::BAD_REQUEST);

    let no_days = post_json(&app.router, "/api/v1/profiles", json!({"id": "basil", "name": "Basil"})).await;
    assert_eq!(no_days.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(no_days).await["error"], "cover_days is required");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = build_test_app().await;
    let response = common::send(
        &app.router,
        axum::http::Method::POST,
        "/api/v1/profiles",
        Some(json!(["not", "an", "object"])),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Calendar
// ---------------------------------------------------------------------------

#[tokio::test]
async fn calendar_lists_events_in_range() {
    let app = build_test_app().await;
    post_json(
        &app.router,
        "/api/v1/plots/A1/deploy",
        json!({"profile_id": "rukola", "start_date": "2024-01-01"}),
    )
    .await;
    post_json(
        &app.router,
        "/api/v1/plots/A2/deploy",
        json!({"profile_id": "koriandr", "start_date": "2024-03-01"}),
    )
    .await;

    let json = body_json(get(&app.router, "/api/v1/calendar?start=2024-01-10&end=2024-02-01").await).await;
    let events = json["data"].as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["summary"], "🌱 Rukola @ A1");
    assert_eq!(events[0]["start"], "2024-01-01");
    assert_eq!(events[0]["end"], "2024-01-13");
}

#[tokio::test]
async fn calendar_requires_valid_range() {
    let app = build_test_app().await;

    let missing = get(&app.router, "/api/v1/calendar?start=2024-01-01").await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let bad = get(&app.router, "/api/v1/calendar?start=2024-01-01&end=soon").await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn calendar_next_names_entity() {
    let app = build_test_app().await;

    let json = body_json(get(&app.router, "/api/v1/calendar/next").await).await;
    assert_eq!(json["data"]["entity_id"], "calendar.microgreens");
    assert_eq!(json["data"]["event"], serde_json::Value::Null);
}
