//! API tests driving the router in-process

use std::collections::HashSet;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use laptop_catalog::{
    api::{create_router, REQUEST_TIMEOUT_HEADER},
    models::laptop::{Laptop, Memory, MemoryUnit, SearchLaptopResponse},
    sample, AppConfig, AppState,
};

fn app() -> Router {
    create_router(AppState::new(AppConfig::default()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.expect("request failed");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("cannot read body");
    (status, body.to_vec())
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create(app: &Router, laptop: &Laptop) -> (StatusCode, Value) {
    let (status, body) = send(app, post_json("/api/v1/laptops", &json!({ "laptop": laptop }))).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Request::get("/api/v1/health").body(Body::empty()).unwrap()).await;

    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["laptops"], 0);
}

#[tokio::test]
async fn test_create_and_get_laptop() {
    let app = app();
    let laptop = sample::new_laptop();

    let (status, body) = create(&app, &laptop).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], laptop.id);

    let (status, body) = send(
        &app,
        Request::get(format!("/api/v1/laptops/{}", laptop.id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let stored: Laptop = serde_json::from_slice(&body).unwrap();
    assert_eq!(stored, laptop);
}

#[tokio::test]
async fn test_create_without_id() {
    let app = app();
    let mut laptop = sample::new_laptop();
    laptop.id = String::new();

    let (status, body) = create(&app, &laptop).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_create_invalid_id() {
    let app = app();
    let mut laptop = sample::new_laptop();
    laptop.id = "invalid-uuid".to_string();

    let (status, body) = create(&app, &laptop).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "InvalidArgument");
    assert_eq!(body["code"], 3);
}

#[tokio::test]
async fn test_create_duplicate_id() {
    let app = app();
    let laptop = sample::new_laptop();

    let (status, _) = create(&app, &laptop).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = create(&app, &laptop).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "AlreadyExists");
}

#[tokio::test]
async fn test_create_with_expired_deadline() {
    let app = app();
    let laptop = sample::new_laptop();
    let request = Request::post("/api/v1/laptops")
        .header(header::CONTENT_TYPE, "application/json")
        .header(REQUEST_TIMEOUT_HEADER, "0")
        .body(Body::from(json!({ "laptop": laptop }).to_string()))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "DeadlineExceeded");
}

#[tokio::test]
async fn test_bad_timeout_header() {
    let app = app();
    let request = Request::post("/api/v1/laptops")
        .header(header::CONTENT_TYPE, "application/json")
        .header(REQUEST_TIMEOUT_HEADER, "soon")
        .body(Body::from(json!({ "laptop": sample::new_laptop() }).to_string()))
        .unwrap();

    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_laptop() {
    let app = app();
    let (status, body) = send(
        &app,
        Request::get("/api/v1/laptops/6f1e5c1a-0000-4000-8000-000000000000")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_search_laptops() {
    let app = app();
    let mut expected = HashSet::new();

    for i in 0..6 {
        let mut laptop = sample::new_laptop();
        laptop.price_usd = 1800.0;
        let cpu = laptop.cpu.as_mut().unwrap();
        cpu.number_cores = 4;
        cpu.number_threads = 8;
        cpu.min_ghz = 2.5;
        cpu.max_ghz = 4.5;
        laptop.ram = Some(Memory::gigabytes(16));

        match i {
            0 => laptop.price_usd = 2500.0,
            1 => laptop.cpu.as_mut().unwrap().number_cores = 2,
            2 => laptop.cpu.as_mut().unwrap().min_ghz = 2.0,
            3 => laptop.ram = Some(Memory::new(4096, MemoryUnit::Megabyte)),
            4 => {
                laptop.price_usd = 1999.0;
                expected.insert(laptop.id.clone());
            }
            _ => {
                laptop.price_usd = 2000.0;
                let cpu = laptop.cpu.as_mut().unwrap();
                cpu.number_cores = 6;
                cpu.number_threads = 12;
                cpu.min_ghz = 2.8;
                laptop.ram = Some(Memory::gigabytes(64));
                expected.insert(laptop.id.clone());
            }
        }

        let (status, _) = create(&app, &laptop).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let filter = json!({
        "filter": {
            "max_price_usd": 2000.0,
            "min_cpu_cores": 4,
            "min_cpu_ghz": 2.2,
            "min_ram": { "value": 8, "unit": "GIGABYTE" }
        }
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/v1/laptops/search", &filter))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/x-ndjson");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let found: HashSet<String> = body
        .split(|&b| b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_slice::<SearchLaptopResponse>(line).unwrap().laptop.id)
        .collect();

    assert_eq!(found, expected);
}

#[tokio::test]
async fn test_search_empty_catalog() {
    let app = app();
    let filter = json!({ "filter": { "max_price_usd": 5000.0 } });

    let (status, body) = send(&app, post_json("/api/v1/laptops/search", &filter)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_search_with_expired_deadline() {
    let app = app();
    for _ in 0..5 {
        let mut laptop = sample::new_laptop();
        laptop.price_usd = 100.0;
        let (status, _) = create(&app, &laptop).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let request = Request::post("/api/v1/laptops/search")
        .header(header::CONTENT_TYPE, "application/json")
        .header(REQUEST_TIMEOUT_HEADER, "0")
        .body(Body::from(json!({ "filter": { "max_price_usd": 5000.0 } }).to_string()))
        .unwrap();

    let (status, body) = send(&app, request).await;

    // Not mistaken for an empty result
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    let body: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(body["error"], "DeadlineExceeded");
    assert_eq!(body["code"], 4);
}

#[tokio::test]
async fn test_openapi_document() {
    let app = app();
    let (status, body) = send(
        &app,
        Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert!(doc["paths"]["/laptops/search"].is_object());
}
