use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderName, HeaderValue, StatusCode},
    routing::post,
};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use clap::Parser;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use uuid::Uuid;

use crate::{
    application::http::server::http_server::{router, state},
    args::Args,
};

async fn test_server_with(extra: &[&str]) -> TestServer {
    let mut argv = vec!["allerscan-api", "--disable-metrics"];
    argv.extend_from_slice(extra);

    let args = Arc::new(Args::try_parse_from(argv).unwrap());
    let state = state(args).await.unwrap();
    TestServer::new(router(state).unwrap()).unwrap()
}

async fn test_server() -> TestServer {
    test_server_with(&[]).await
}

fn session_header() -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-session-id"),
        HeaderValue::from_str(&Uuid::new_v4().to_string()).unwrap(),
    )
}

/// Serves a fixed Gemini `generateContent` reply on an ephemeral port.
async fn spawn_gemini_stub(reply: Value) -> String {
    let body = json!({
        "candidates": [{ "content": { "parts": [{ "text": reply.to_string() }] } }]
    });
    let app = Router::new().route(
        "/models/{*rest}",
        post(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn health_reports_ok() {
    let server = test_server().await;

    let response = server.get("/health").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn new_session_gets_the_default_profile() {
    let server = test_server().await;
    let (name, value) = session_header();

    let response = server.get("/profile").add_header(name, value).await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(
        body["data"]["allergens"],
        json!(["Peanuts", "Tree Nuts", "Milk (Dairy)"])
    );
}

#[tokio::test]
async fn profile_updates_persist_per_session() {
    let server = test_server().await;
    let (name, value) = session_header();

    server
        .put("/profile")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "allergens": ["Sesame"], "cuisine_preference": "Thai" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/profile/allergens")
        .add_header(name.clone(), value.clone())
        .json(&json!({ "allergen": "Mustard" }))
        .await;
    response.assert_status_ok();

    let body = server
        .get("/profile")
        .add_header(name, value)
        .await
        .json::<Value>();
    assert_eq!(body["data"]["allergens"], json!(["Sesame", "Mustard"]));
    assert_eq!(body["data"]["cuisine_preference"], "Thai");

    let (other_name, other_value) = session_header();
    let other = server
        .get("/profile")
        .add_header(other_name, other_value)
        .await
        .json::<Value>();
    assert_eq!(
        other["data"]["allergens"],
        json!(["Peanuts", "Tree Nuts", "Milk (Dairy)"])
    );
}

#[tokio::test]
async fn blank_custom_allergen_is_rejected() {
    let server = test_server().await;
    let (name, value) = session_header();

    let response = server
        .post("/profile/allergens")
        .add_header(name, value)
        .json(&json!({ "allergen": "" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "E_VALIDATION");
}

#[tokio::test]
async fn missing_session_header_is_a_bad_request() {
    let server = test_server().await;

    let response = server.get("/profile").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "E_BAD_REQUEST");
}

#[tokio::test]
async fn check_ingredients_uses_explicit_allergens() {
    let server = test_server().await;
    let (name, value) = session_header();

    let response = server
        .post("/allergens/check")
        .add_header(name, value)
        .json(&json!({
            "ingredients": ["Rice noodles", "Peanuts", "Lime"],
            "allergens": ["Peanuts", "Sesame"]
        }))
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"]["allergen_detected"], true);
    assert_eq!(body["data"]["detected_allergens"], json!(["Peanuts"]));
    assert_eq!(body["data"]["risk_level"], "HIGH");
}

#[tokio::test]
async fn check_ingredients_rejects_blank_text() {
    let server = test_server().await;
    let (name, value) = session_header();

    let response = server
        .post("/allergens/check")
        .add_header(name, value)
        .json(&json!({ "ingredients": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "E_PRECONDITION");
}

#[tokio::test]
async fn common_allergens_need_no_session() {
    let server = test_server().await;

    let response = server.get("/allergens/common").await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["data"].as_array().map(Vec::len),
        Some(12)
    );
}

#[tokio::test]
async fn foods_are_listed_and_looked_up_case_insensitively() {
    let server = test_server().await;

    let list = server.get("/foods").await;
    list.assert_status_ok();
    assert_eq!(
        list.json::<Value>()["data"].as_array().map(Vec::len),
        Some(6)
    );

    let food = server.get("/foods/pad%20thai").await;
    food.assert_status_ok();
    assert_eq!(food.json::<Value>()["data"]["name"], "Pad Thai");

    server
        .get("/foods/unknown")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn zero_byte_image_fails_before_inference() {
    let server = test_server().await;
    let (name, value) = session_header();

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(Vec::<u8>::new())
            .file_name("empty.jpg")
            .mime_type("image/jpeg"),
    );
    let response = server
        .post("/scans/food")
        .add_header(name, value)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "E_PRECONDITION");
}

#[tokio::test]
async fn scan_without_image_is_a_precondition_failure() {
    let server = test_server().await;
    let (name, value) = session_header();

    let response = server
        .post("/scans/label")
        .add_header(name, value)
        .multipart(MultipartForm::new().add_text("note", "no image here"))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["code"], "E_PRECONDITION");
}

#[tokio::test]
async fn cancel_without_scan_returns_no_content() {
    let server = test_server().await;
    let (name, value) = session_header();

    server
        .delete("/scans/current")
        .add_header(name, value)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn food_scan_assesses_reference_ingredients() {
    let base_url = spawn_gemini_stub(json!({
        "isFood": true,
        "classification": "Pad Thai",
        "confidence": 0.94
    }))
    .await;
    let server = test_server_with(&["--gemini-base-url", base_url.as_str()]).await;
    let (name, value) = session_header();

    let form = MultipartForm::new().add_text(
        "photo_data_uri",
        "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==",
    );
    let response = server
        .post("/scans/food")
        .add_header(name, value)
        .multipart(form)
        .await;

    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["data"]["outcome"], "assessed");
    assert_eq!(body["data"]["food_details"]["name"], "Pad Thai");
    assert_eq!(body["data"]["verdict"]["allergen_detected"], true);
    assert_eq!(
        body["data"]["verdict"]["detected_allergens"],
        json!(["Peanuts"])
    );
}

#[tokio::test]
async fn provider_outage_maps_to_bad_gateway() {
    let server = test_server_with(&["--gemini-base-url", "http://127.0.0.1:9"]).await;
    let (name, value) = session_header();

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0xFF, 0xD8, 0xFF, 0xE0])
            .file_name("dish.jpg")
            .mime_type("image/jpeg"),
    );
    let response = server
        .post("/scans/food")
        .add_header(name, value)
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_eq!(response.json::<Value>()["code"], "E_ANALYSIS_FAILED");
}
