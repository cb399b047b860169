//! Integration tests for the HTTP surface
//!
//! These tests drive the axum router directly with `tower::ServiceExt::oneshot`.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use geolens::server::create_app;
use geolens::{Config, Scanner};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_app() -> Router {
    let scanner = Scanner::new(&Config::default()).expect("client builds");
    create_app(Arc::new(scanner))
}

fn scan_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/scan")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

#[tokio::test]
async fn test_scan_endpoint_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>Home</title></head><body><h1>Hi</h1></body></html>",
            "text/html",
        ))
        .mount(&mock_server)
        .await;

    let payload = serde_json::json!({ "url": format!("{}/", mock_server.uri()) }).to_string();
    let response = create_test_app().oneshot(scan_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["ok"], true);
    assert_eq!(json["finalUrl"], format!("{}/", mock_server.uri()));
    assert!(json["score"].as_u64().unwrap() <= 100);
    assert_eq!(json["checks"].as_array().unwrap().len(), 12);
    assert_eq!(json["checks"][0]["key"], "Title");
    assert_eq!(json["checks"][0]["status"], "good");
    assert_eq!(json["checks"][0]["weight"], 10);
    assert_eq!(json["meta"]["title"], "Home");
    assert!(json["heur"]["robotsTxtOk"].is_boolean());
    assert!(json["scannedAt"].is_string());
}

#[tokio::test]
async fn test_scan_endpoint_invalid_url() {
    for payload in [
        r#"{"url":"example.com"}"#,
        r#"{"url":""}"#,
        r#"{}"#,
        r#"{"url":"ftp://example.com/"}"#,
    ] {
        let response = create_test_app().oneshot(scan_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);

        let json = body_json(response).await;
        assert_eq!(
            json,
            serde_json::json!({ "ok": false, "error": "Valid http(s) URL required" })
        );
    }
}

#[tokio::test]
async fn test_scan_endpoint_malformed_body() {
    let response = create_test_app()
        .oneshot(scan_request("not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    assert_eq!(json["error"], "Valid http(s) URL required");
}

#[tokio::test]
async fn test_scan_endpoint_fetch_failure() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&mock_server)
        .await;

    let payload = serde_json::json!({ "url": format!("{}/data", mock_server.uri()) }).to_string();
    let response = create_test_app().oneshot(scan_request(payload)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["ok"], false);
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Scan failed: "), "{}", error);
    assert!(error.contains("application/json"), "{}", error);
}

#[tokio::test]
async fn test_robots_txt_route() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/robots.txt").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    assert_eq!(
        body_text(response).await,
        "User-agent: *\nAllow: /\n\nSitemap: https://www.seenbygeo.com/sitemap.xml\n"
    );
}

#[tokio::test]
async fn test_sitemap_route() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/xml");

    let xml = body_text(response).await;
    for page in ["", "/product", "/pricing", "/company", "/news", "/playbooks"] {
        assert!(
            xml.contains(&format!("<loc>https://www.seenbygeo.com{}</loc>", page)),
            "missing {:?}",
            page
        );
    }
}

#[tokio::test]
async fn test_unknown_route() {
    let response = create_test_app()
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
