// tests/integration/subscriptions/total_cost_tests.rs

use axum::{body, http::StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::common::{request, setup_app};

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn seed_subscription(
    app: &axum::Router,
    user_id: Uuid,
    service_name: &str,
    price: i32,
    start_date: &str,
    end_date: Option<&str>,
) {
    let mut payload = json!({
        "service_name": service_name,
        "price": price,
        "user_id": user_id.to_string(),
        "start_date": start_date,
    });
    if let Some(end_date) = end_date {
        payload["end_date"] = json!(end_date);
    }

    let res = app
        .clone()
        .oneshot(request::json_request("POST", "/api/subscriptions", &payload))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_total_cost_requires_parameters() {
    let (app, _db) = setup_app().await;

    let missing_end_date = format!(
        "/api/subscriptions/total?user_id={}&start_date=01-2025",
        Uuid::new_v4()
    );
    let uris = vec![
        "/api/subscriptions/total",
        "/api/subscriptions/total?user_id=123",
        missing_end_date.as_str(),
    ];

    for uri in uris {
        let res = app
            .clone()
            .oneshot(request::empty_request("GET", uri))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error = response_json(res).await;
        assert_eq!(error["error"], "user_id, start_date and end_date are required");
    }
}

#[tokio::test]
async fn test_total_cost_invalid_user_id() {
    let (app, _db) = setup_app().await;

    let res = app
        .clone()
        .oneshot(request::empty_request(
            "GET",
            "/api/subscriptions/total?user_id=not-a-uuid&start_date=01-2025&end_date=12-2025",
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error = response_json(res).await;
    assert_eq!(error["error"], "Invalid user_id format");
}

#[tokio::test]
async fn test_total_cost_invalid_dates() {
    let (app, _db) = setup_app().await;
    let user_id = Uuid::new_v4();

    let res = app
        .clone()
        .oneshot(request::empty_request(
            "GET",
            &format!(
                "/api/subscriptions/total?user_id={}&start_date=2025-01&end_date=12-2025",
                user_id
            ),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error = response_json(res).await;
    assert_eq!(error["error"], "Invalid start_date format (use MM-YYYY)");

    // end_date が start_date より前
    let res = app
        .clone()
        .oneshot(request::empty_request(
            "GET",
            &format!(
                "/api/subscriptions/total?user_id={}&start_date=06-2025&end_date=01-2025",
                user_id
            ),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error = response_json(res).await;
    assert_eq!(error["error"], "end_date must not be before start_date");
}

#[tokio::test]
async fn test_total_cost_aggregation() {
    let (app, _db) = setup_app().await;
    let user_id = Uuid::new_v4();

    // 無期限の購読と期限付きの購読
    seed_subscription(&app, user_id, "Netflix", 100, "01-2025", None).await;
    seed_subscription(&app, user_id, "Spotify", 200, "03-2025", Some("05-2025")).await;
    // 他ユーザーの購読は集計対象外
    seed_subscription(&app, Uuid::new_v4(), "Netflix", 999, "01-2025", None).await;

    let res = app
        .clone()
        .oneshot(request::empty_request(
            "GET",
            &format!(
                "/api/subscriptions/total?user_id={}&start_date=04-2025&end_date=06-2025",
                user_id
            ),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["total_cost"], 300);
    assert_eq!(body["subscriptions_count"], 2);
}

#[tokio::test]
async fn test_total_cost_excludes_ended_subscriptions() {
    let (app, _db) = setup_app().await;
    let user_id = Uuid::new_v4();

    seed_subscription(&app, user_id, "Netflix", 100, "01-2025", None).await;
    seed_subscription(&app, user_id, "Spotify", 200, "03-2025", Some("05-2025")).await;

    // 期間 06-2025 以降には Spotify は重ならない
    let res = app
        .clone()
        .oneshot(request::empty_request(
            "GET",
            &format!(
                "/api/subscriptions/total?user_id={}&start_date=06-2025&end_date=12-2025",
                user_id
            ),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["total_cost"], 100);
    assert_eq!(body["subscriptions_count"], 1);
}

#[tokio::test]
async fn test_total_cost_with_service_name_filter() {
    let (app, _db) = setup_app().await;
    let user_id = Uuid::new_v4();

    seed_subscription(&app, user_id, "Netflix", 100, "01-2025", None).await;
    seed_subscription(&app, user_id, "Spotify", 200, "01-2025", None).await;

    let res = app
        .clone()
        .oneshot(request::empty_request(
            "GET",
            &format!(
                "/api/subscriptions/total?user_id={}&service_name=Spotify&start_date=01-2025&end_date=12-2025",
                user_id
            ),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["total_cost"], 200);
    assert_eq!(body["subscriptions_count"], 1);
}

#[tokio::test]
async fn test_total_cost_no_matches() {
    let (app, _db) = setup_app().await;

    let res = app
        .clone()
        .oneshot(request::empty_request(
            "GET",
            &format!(
                "/api/subscriptions/total?user_id={}&start_date=01-2025&end_date=12-2025",
                Uuid::new_v4()
            ),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["total_cost"], 0);
    assert_eq!(body["subscriptions_count"], 0);
}
