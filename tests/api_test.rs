//! End-to-end tests for the composed application

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use serverless_api::config::AppConfig;
use serverless_api::{api, create_app, Error};
use tower::ServiceExt; // for oneshot

fn app_with_segment(segment: &str) -> Router {
    let config = AppConfig {
        env: segment.to_string(),
        ..Default::default()
    };
    create_app(&config).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, header::HeaderMap, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, bytes.to_vec())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, _, bytes) = send(app, get(uri)).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn health_route_at_root_and_api_prefix() {
    for segment in ["", "dev", "/prod/"] {
        let app = app_with_segment(segment);
        for uri in ["/", "/api/v1/"] {
            let (status, body) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::OK, "{uri} with segment {segment:?}");
            assert_eq!(body, json!({ "message": "Hello World" }));
        }
    }
}

#[tokio::test]
async fn collections_return_fixed_records() {
    let app = app_with_segment("");
    for uri in ["/api/v1/items/", "/api/v1/users/"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "name": "Foo" }, { "name": "Bar" }]));
    }
}

#[tokio::test]
async fn collections_ignore_query_and_headers() {
    let app = app_with_segment("");
    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/items/?limit=1&name=Baz")
        .header("x-custom", "value")
        .header(header::ACCEPT, "text/plain")
        .body(Body::empty())
        .unwrap();

    let (status, headers, bytes) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(bytes, br#"[{"name":"Foo"},{"name":"Bar"}]"#.to_vec());
}

#[tokio::test]
async fn undeclared_path_is_not_found() {
    let app = app_with_segment("");
    let (status, body) = get_json(&app, "/api/v1/orders/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "detail": "Not Found" }));
}

#[tokio::test]
async fn wrong_method_on_known_path_is_rejected() {
    let app = app_with_segment("");
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/items/")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = send(&app, request).await;
    assert!(status.is_client_error(), "unexpected status {status}");
}

#[tokio::test]
async fn missing_trailing_slash_redirects_to_collection() {
    let app = app_with_segment("");
    let (status, headers, _) = send(&app, get("/api/v1/users")).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers[header::LOCATION], "/api/v1/users/");
}

#[tokio::test]
async fn repeated_requests_are_byte_identical() {
    let app = app_with_segment("");
    for uri in ["/", "/api/v1/", "/api/v1/items/", "/api/v1/users/", "/nope"] {
        let first = send(&app, get(uri)).await;
        for _ in 0..5 {
            let again = send(&app, get(uri)).await;
            assert_eq!(again.0, first.0);
            assert_eq!(again.1, first.1);
            assert_eq!(again.2, first.2);
        }
    }
}

#[tokio::test]
async fn every_response_carries_cors_headers() {
    let app = app_with_segment("");
    for uri in ["/", "/api/v1/items/", "/api/v1/orders/", "/docs", "/api/v1/users"] {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::ORIGIN, "https://example.com")
            .body(Body::empty())
            .unwrap();
        let (_, headers, _) = send(&app, request).await;
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*",
            "missing allow-origin on {uri}"
        );
    }

    // Without an Origin header the wildcard is still sent
    let (_, headers, _) = send(&app, get("/api/v1/orders/")).await;
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn preflight_allows_any_method_and_header() {
    let app = app_with_segment("");
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/items/")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-api-key")
        .body(Body::empty())
        .unwrap();

    let (status, headers, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "*");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "*");
}

#[tokio::test]
async fn root_segment_mounts_api_again() {
    let app = app_with_segment("dev");

    let (status, body) = get_json(&app, "/dev/api/v1/items/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "name": "Foo" }, { "name": "Bar" }]));

    let (status, body) = get_json(&app, "/dev/api/v1/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Hello World" }));

    // Unprefixed routes keep working
    let (status, _) = get_json(&app, "/api/v1/users/").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get_json(&app, "/prod/api/v1/items/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_describes_routes() {
    let app = app_with_segment("dev");
    let (status, doc) = get_json(&app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(doc["openapi"], "3.1.0");
    assert_eq!(doc["servers"], json!([{ "url": "/dev" }]));

    let paths = doc["paths"].as_object().unwrap();
    let mut listed: Vec<&str> = paths.keys().map(String::as_str).collect();
    listed.sort_unstable();
    assert_eq!(listed, vec!["/", "/api/v1/", "/api/v1/items/", "/api/v1/users/"]);
    assert_eq!(doc["paths"]["/api/v1/users/"]["get"]["tags"], json!(["users"]));
}

#[tokio::test]
async fn documentation_pages_are_served() {
    let app = app_with_segment("");

    let (status, headers, _) = send(&app, get("/docs")).await;
    assert!(status.is_redirection(), "unexpected status {status}");
    assert_eq!(headers[header::LOCATION], "/docs/");

    let (status, headers, bytes) = send(&app, get("/docs/")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    assert!(String::from_utf8(bytes).unwrap().contains("swagger-ui"));

    // ReDoc embeds the document in its page
    let (status, _, bytes) = send(&app, get("/redoc")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(bytes)
        .unwrap()
        .contains("Serverless API on AWS Lambda"));
}

#[tokio::test]
async fn schema_is_served_without_swagger_ui() {
    let mut config = AppConfig::default();
    config.app.docs_url = String::new();
    let app = create_app(&config).unwrap();

    let (status, doc) = get_json(&app, "/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Serverless API on AWS Lambda");

    let (status, _) = get_json(&app, "/docs/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn documentation_can_be_disabled() {
    let mut config = AppConfig::default();
    config.app.openapi_url = String::new();
    let app = create_app(&config).unwrap();

    for uri in ["/openapi.json", "/docs", "/redoc"] {
        let (status, _, _) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri} should be gone");
    }
}

#[test]
fn invalid_root_segment_fails_at_startup() {
    let config = AppConfig {
        env: "dev/eu".to_string(),
        ..Default::default()
    };
    assert!(matches!(create_app(&config), Err(Error::InvalidConfig(_))));
}

#[test]
fn documentation_colliding_with_api_fails_at_startup() {
    let mut config = AppConfig::default();
    config.app.docs_url = "/api/v1/items/".to_string();

    match create_app(&config) {
        Err(Error::RouteCollision { method, path }) => {
            assert_eq!(method, axum::http::Method::GET);
            assert_eq!(path, "/api/v1/items/");
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected a route collision"),
    }
}

#[tokio::test]
async fn occupied_port_reports_io_error() {
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = taken.local_addr().unwrap().port();

    let result = api::serve(app_with_segment(""), "127.0.0.1", port).await;
    assert!(matches!(result, Err(Error::Io(_))), "unexpected result {result:?}");
}
