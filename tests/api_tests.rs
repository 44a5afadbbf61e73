use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use async_trait::async_trait;
use girlmath::clients::{FetchError, ProductPageSource, ScrapedProduct};
use girlmath::config::Config;
use std::sync::Arc;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

const PRODUCT_URL: &str = "https://www.amazon.com/Apple-AirPods-Pro-2nd-Generation/dp/B0BDHWDR12/";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.scraper.live_enabled = false;

    let state = girlmath::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    girlmath::api::router(state).await
}

/// Retailer that always answers with one in-stock product.
struct InStockSource;

#[async_trait]
impl ProductPageSource for InStockSource {
    async fn resolve_short_link(&self, _code: &str) -> Result<String, FetchError> {
        Ok("https://www.amazon.com/Nitro-V-Gaming-Laptop/dp/B0CHX1W1XY?ref=share".to_string())
    }

    async fn fetch_product(&self, _asin: &str) -> Result<ScrapedProduct, FetchError> {
        Ok(ScrapedProduct {
            title: Some("Nitro V Gaming Laptop".to_string()),
            price: 899.99,
        })
    }

    async fn fetch_title(&self, _asin: &str) -> Result<Option<String>, FetchError> {
        Ok(Some("Nitro V Gaming Laptop".to_string()))
    }
}

async fn spawn_app_with_source(source: Arc<dyn ProductPageSource>) -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;

    let state = girlmath::api::create_app_state_with_source(config, source)
        .await
        .expect("Failed to create app state");
    girlmath::api::router(state).await
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn session_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .expect("session cookie")
        .to_string()
}

#[tokio::test]
async fn test_system_status() {
    let app = spawn_app().await;

    let response = send(&app, "GET", "/api/system/status", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["database"], true);
    assert_eq!(body["data"]["live_scraping"], false);
}

#[tokio::test]
async fn test_lookup_stores_product_and_history() {
    let app = spawn_app().await;

    let response = send(&app, "POST", "/api/lookup", Some(json!({ "url": PRODUCT_URL })), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let data = &body["data"];
    assert_eq!(data["demo"], true);
    assert_eq!(data["product"]["asin"], "B0BDHWDR12");
    assert_eq!(data["product"]["category"], "electronics");
    assert_eq!(data["product"]["price_data"].as_array().unwrap().len(), 90);
    assert_eq!(data["is_favorite"], false);
    assert!(data["girl_math"]["statement"].as_str().unwrap().len() > 10);

    let response = send(&app, "GET", "/api/products/B0BDHWDR12", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let stored = json_body(response).await;
    assert_eq!(stored["data"]["demo"], false);
    assert_eq!(
        stored["data"]["product"]["current_price"],
        data["product"]["current_price"]
    );

    let response = send(&app, "GET", "/api/history?limit=5", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let history = json_body(response).await;
    let entries = history["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["asin"], "B0BDHWDR12");
    assert_eq!(entries[0]["url"], PRODUCT_URL);
    assert_eq!(entries[0]["title"], data["product"]["title"]);
}

#[tokio::test]
async fn test_live_lookup_is_anchored_to_scraped_price() {
    let app = spawn_app_with_source(Arc::new(InStockSource)).await;

    let response = send(&app, "POST", "/api/lookup", Some(json!({ "url": PRODUCT_URL })), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let product = &body["data"]["product"];
    assert_eq!(body["data"]["demo"], false);
    assert_eq!(product["demo"], false);
    assert_eq!(product["asin"], "B0BDHWDR12");
    assert_eq!(product["title"], "Nitro V Gaming Laptop");
    assert_eq!(product["current_price"].as_f64(), Some(899.99));
    assert!(product["peak_price"].as_f64().unwrap() > 899.99);
    assert_eq!(product["price_data"].as_array().unwrap().len(), 90);

    let response = send(&app, "GET", "/api/products/B0BDHWDR12", None, None).await;
    let stored = json_body(response).await;
    assert_eq!(stored["data"]["product"]["current_price"].as_f64(), Some(899.99));
}

#[tokio::test]
async fn test_live_short_link_resolves_and_forced_demo_keeps_title() {
    let app = spawn_app_with_source(Arc::new(InStockSource)).await;

    let response = send(
        &app,
        "POST",
        "/api/lookup",
        Some(json!({ "url": "https://a.co/d/8iGnbpL", "demo": true })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let product = &body["data"]["product"];
    assert_eq!(body["data"]["demo"], true);
    assert_eq!(product["asin"], "B0CHX1W1XY");
    assert_eq!(product["category"], "electronics");
    assert_eq!(product["title"], "Nitro V Gaming Laptop");
}

#[tokio::test]
async fn test_lookup_short_link_without_network_uses_code() {
    let app = spawn_app().await;

    let response = send(
        &app,
        "POST",
        "/api/lookup",
        Some(json!({ "url": "https://a.co/d/8iGnbpL", "demo": true })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["data"]["product"]["asin"], "8iGnbpL");
    assert_eq!(body["data"]["product"]["category"], "tech");
}

#[tokio::test]
async fn test_lookup_errors() {
    let app = spawn_app().await;

    let response = send(
        &app,
        "POST",
        "/api/lookup",
        Some(json!({ "url": "https://example.com" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("product ID"));

    let response = send(&app, "GET", "/api/products/B000000000", None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorite_toggle_round_trip() {
    let app = spawn_app().await;
    send(&app, "POST", "/api/lookup", Some(json!({ "url": PRODUCT_URL })), None).await;

    let response = send(
        &app,
        "POST",
        "/api/favorites/B0BDHWDR12/toggle",
        Some(json!({ "notes": "birthday gift" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["is_favorite"], true);

    let response = send(&app, "GET", "/api/favorites", None, None).await;
    let favorites = json_body(response).await;
    let list = favorites["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["notes"], "birthday gift");

    let response = send(&app, "POST", "/api/favorites/B0BDHWDR12/toggle", None, None).await;
    assert_eq!(json_body(response).await["data"]["is_favorite"], false);

    let response = send(&app, "GET", "/api/favorites/B0BDHWDR12", None, None).await;
    assert_eq!(json_body(response).await["data"]["is_favorite"], false);

    let response = send(&app, "POST", "/api/favorites/not-an-asin!/toggle", None, None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_account_and_coupon_flow() {
    let app = spawn_app().await;

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "username": "cady", "password": "grool" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let cookie = session_cookie(&response);
    let body = json_body(response).await;
    assert_eq!(body["data"]["tier"], "free");
    assert_eq!(body["data"]["features"]["name"], "Barbie Basic");

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "username": "cady", "password": "other" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = send(&app, "GET", "/api/coupons/crystalcallahan", None, None).await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["status"], "valid");
    assert_eq!(body["data"]["tier"], "platinum");

    let response = send(
        &app,
        "POST",
        "/api/coupons/redeem",
        Some(json!({ "code": "crystalcallahan" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["tier"], "platinum");
    assert_eq!(body["data"]["features"]["name"], "Mean Girls Platinum");

    let response = send(
        &app,
        "POST",
        "/api/coupons/redeem",
        Some(json!({ "code": "crystalcallahan" })),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, "GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["data"]["tier"], "platinum");

    let response = send(&app, "GET", "/api/coupons/crystalcallahan", None, None).await;
    assert_eq!(json_body(response).await["data"]["status"], "already_used");
}

#[tokio::test]
async fn test_login_and_session() {
    let app = spawn_app().await;

    send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "username": "regina", "password": "fetch123", "email": "r@north.shore" })),
        None,
    )
    .await;

    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "regina", "password": "wrong" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(json!({ "username": "regina", "password": "fetch123" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = session_cookie(&response);
    let body = json_body(response).await;
    assert_eq!(body["data"]["email"], "r@north.shore");
    assert!(body["data"]["last_login"].is_string());

    let response = send(&app, "GET", "/api/auth/me", None, Some(&cookie)).await;
    assert_eq!(json_body(response).await["data"]["username"], "regina");

    let response = send(&app, "GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        "POST",
        "/api/coupons/redeem",
        Some(json!({ "code": "crystalcallahan" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_validation() {
    let app = spawn_app().await;

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "username": "gretchen", "password": "abc" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        "POST",
        "/api/auth/register",
        Some(json!({ "username": "  ", "password": "abcd" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tiers() {
    let app = spawn_app().await;

    let response = send(&app, "GET", "/api/tiers", None, None).await;
    let body = json_body(response).await;
    let tiers = body["data"].as_array().unwrap();
    assert_eq!(tiers.len(), 3);
    assert_eq!(tiers[1]["name"], "Clueless Besties");
    assert_eq!(tiers[1]["max_searches_per_day"], 50);
    assert!(tiers[2]["max_searches_per_day"].is_null());

    let response = send(&app, "GET", "/api/tiers/gold", None, None).await;
    let body = json_body(response).await;
    assert_eq!(body["data"]["name"], "Barbie Basic");
}
