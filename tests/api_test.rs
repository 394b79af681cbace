//! Router-level tests: authentication, role gate and request validation.

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Datelike, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use oil_shop_pos::api::{create_router, AppState};
use oil_shop_pos::commands::seed::seed;
use oil_shop_pos::domain::period::today_local;
use oil_shop_pos::domain::{Password, UserRole};
use oil_shop_pos::infra::UnitOfWork;

const ADMIN_PASSWORD: &str = "admin123";
const CASHIER_PASSWORD: &str = "cashier-pass";

async fn app() -> Router {
    let db = common::database().await;
    let uow = common::persistence(&db);
    seed(uow.as_ref(), ADMIN_PASSWORD).await.unwrap();
    uow.users()
        .create(
            "cashier".to_string(),
            Password::new(CASHIER_PASSWORD).unwrap().into_string(),
            UserRole::User,
        )
        .await
        .unwrap();

    create_router(AppState::from_config(Arc::new(db), common::config()))
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_login_returns_token_and_user() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": ADMIN_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "username": "admin", "password": "wrong-password" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_missing_fields_is_400() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/api/auth/login", None, Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_reports_require_token() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/reports/daily", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access token required");
}

#[tokio::test]
async fn test_non_admin_is_forbidden() {
    let app = app().await;
    let token = login(&app, "cashier", CASHIER_PASSWORD).await;

    let (status, _) = send(&app, Method::GET, "/api/reports/daily", Some(&token), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_impossible_date_is_400() {
    let app = app().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reports/daily?date=2026-02-30",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_daily_report_shape() {
    let app = app().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reports/daily?date=2026-01-15",
        Some(&token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let period = &body["data"]["period"];
    assert_eq!(period["type"], "day");
    assert_eq!(period["timezone"], "Asia/Yangon");
    assert_eq!(period["startUtc"], "2026-01-14T17:30:00.000Z");
    assert_eq!(body["data"]["totals"]["transactionsCount"], 0);
}

#[tokio::test]
async fn test_monthly_details_shape() {
    let app = app().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;
    let (_, oils) = send(&app, Method::GET, "/api/oils", None, None).await;
    let oil = &oils["data"][0];

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sales/confirm",
        Some(&token),
        Some(json!({
            "totalAmount": 1750,
            "totalQuantity": 0.5,
            "saleType": "SINGLE_OIL",
            "items": [{ "oilId": oil["id"], "quantity": 0.5, "lineAmount": 1750 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let today = today_local(Utc::now());
    let uri = format!("/api/reports/monthly/details?year={}&month={}", today.year(), today.month());
    let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let report = &body["data"];
    assert_eq!(report["period"]["utcOffsetMinutes"], 390);
    assert_eq!(report["period"]["label"], format!("{}-{:02}", today.year(), today.month()));
    assert_eq!(report["currency"]["code"], "MMK");
    assert_eq!(report["currency"]["minorUnit"], 0);
    assert_eq!(report["quantityDefinition"]["baseUnit"], "viss_equivalent");
    assert_eq!(report["totals"]["transactions"], 1);
    assert_eq!(report["totals"]["totalSalesAmount"], 1750.0);

    let row = &report["byOil"][0];
    assert_eq!(row["oilId"], oil["id"]);
    assert_eq!(row["unitAtSale"], oil["unit"]);
    assert_eq!(row["lineCount"], 1);
    assert_eq!(row["revenue"], 1750.0);
    assert!(report["generatedAt"].as_str().unwrap().ends_with('Z'));
}

#[tokio::test]
async fn test_monthly_details_rejects_bad_periods() {
    let app = app().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;

    for query in [
        "year=2026&month=13",
        "year=2026",
        "year=0&month=1",
        "year=2147483647&month=12",
        "year=-262143&month=1",
    ] {
        let uri = format!("/api/reports/monthly/details?{query}");
        let (status, body) = send(&app, Method::GET, &uri, Some(&token), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert_eq!(body["error"], "Invalid or missing year/month", "{query}");
    }
}

#[tokio::test]
async fn test_logout_requires_token() {
    let app = app().await;

    let (status, _) = send(&app, Method::POST, "/api/auth/logout", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app, "admin", ADMIN_PASSWORD).await;
    let (status, body) = send(&app, Method::POST, "/api/auth/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Logged out");
}

#[tokio::test]
async fn test_update_oil() {
    let app = app().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;
    let (_, oils) = send(&app, Method::GET, "/api/oils", None, None).await;
    let id = oils["data"][0]["id"].as_i64().unwrap();
    let uri = format!("/api/oils/{id}");

    let (status, _) = send(&app, Method::PUT, &uri, None, Some(json!({ "price_per_unit": 4000 }))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({ "price_per_unit": 4000, "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["message"], "Oil updated successfully");
    assert_eq!(body["data"]["price_per_unit"], 4000.0);
    assert_eq!(body["data"]["is_active"], false);
    assert_eq!(body["data"]["name_en"], oils["data"][0]["name_en"]);

    let (_, body) = send(&app, Method::GET, "/api/oils", None, None).await;
    assert_eq!(body["count"], 4);

    let (status, _) = send(&app, Method::PUT, &uri, Some(&token), Some(json!({ "price_per_unit": -5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/oils/4242",
        Some(&token),
        Some(json!({ "price_per_unit": 4000 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_public_catalogue_and_admin_writes() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/oils", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 5);

    let new_oil = json!({
        "name_en": "Mustard Oil",
        "name_my": "မုန်ညင်းဆီ",
        "description_en": "Cold pressed",
        "description_my": "အအေးညှစ်",
        "price_per_unit": 5000
    });
    let (status, _) = send(&app, Method::POST, "/api/oils", None, Some(new_oil.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&app, "admin", ADMIN_PASSWORD).await;
    let (status, body) = send(&app, Method::POST, "/api/oils", Some(&token), Some(new_oil)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Oil created successfully");
    assert_eq!(body["data"]["unit"], "viss");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = send(&app, Method::DELETE, &format!("/api/oils/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/oils", None, None).await;
    assert_eq!(body["count"], 5);
    let (_, body) = send(&app, Method::GET, "/api/oils/admin/all", Some(&token), None).await;
    assert_eq!(body["count"], 6);
}

#[tokio::test]
async fn test_confirm_sale_and_unknown_oil() {
    let app = app().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;
    let (_, oils) = send(&app, Method::GET, "/api/oils", None, None).await;
    let oil_id = oils["data"][0]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sales/confirm",
        Some(&token),
        Some(json!({
            "totalAmount": 3500,
            "totalQuantity": 1,
            "saleType": "SINGLE_OIL",
            "items": [{ "oilId": oil_id, "quantity": 1, "lineAmount": 3500 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Sale recorded successfully");
    assert_eq!(body["data"]["saleType"], "SINGLE_OIL");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sales/confirm",
        Some(&token),
        Some(json!({
            "totalAmount": 100,
            "totalQuantity": 1,
            "saleType": "SINGLE_OIL",
            "items": [{ "oilId": 4242, "quantity": 1, "lineAmount": 100 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Oil not found for id 4242");

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sales/confirm",
        Some(&token),
        Some(json!({ "saleType": "MIX", "items": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required sale fields or items");
}

#[tokio::test]
async fn test_quote_mix() {
    let app = app().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;
    let (_, oils) = send(&app, Method::GET, "/api/oils/admin/all", Some(&token), None).await;
    let by_name = |name: &str| {
        oils["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|o| o["name_en"] == name)
            .map(|o| o["id"].as_i64().unwrap())
            .unwrap()
    };

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/sales/quote",
        Some(&token),
        Some(json!({ "items": [
            { "oilId": by_name("Palm Oil"), "ticals": 75 },
            { "oilId": by_name("Sesame Oil"), "ticals": 25 }
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["saleType"], "MIX");
    assert_eq!(body["data"]["totalAmount"], 4325.0);
}

#[tokio::test]
async fn test_summary_rejects_bad_month() {
    let app = app().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/sales/summary?year=2026&month=13",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/sales/summary?year=2026&month=1",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["totalSalesValue"], 0.0);
}

#[tokio::test]
async fn test_change_password_then_login_with_new_one() {
    let app = app().await;
    let token = login(&app, "admin", ADMIN_PASSWORD).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/change-password",
        Some(&token),
        Some(json!({
            "currentPassword": ADMIN_PASSWORD,
            "newPassword": "a-better-secret",
            "confirmPassword": "a-better-secret"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    login(&app, "admin", "a-better-secret").await;
}

#[tokio::test]
async fn test_health() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");
}
