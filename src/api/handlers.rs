//! API handlers

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::types::{ErrorDetail, Message};

/// Health check
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = Message))
)]
pub async fn read_root() -> Json<Message> {
    Json(Message {
        message: "Hello World".to_string(),
    })
}

/// Paths the application serves, used to answer unmatched requests.
pub type KnownPaths = Arc<HashSet<String>>;

/// Response for a request no route matched.
///
/// A path that only differs from a served one by its trailing slash is redirected
/// there with `307`; anything else is `404 {"detail": "Not Found"}`.
pub fn not_found(known: &KnownPaths, uri: &Uri) -> Response {
    let path = uri.path();
    if let Some(alternate) = alternate_path(path).filter(|alt| known.contains(alt)) {
        let location = match uri.query() {
            Some(query) => format!("{}?{}", alternate, query),
            None => alternate,
        };
        tracing::debug!(from = %path, to = %location, "Redirecting to canonical path");
        return (StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response();
    }

    (
        StatusCode::NOT_FOUND,
        Json(ErrorDetail {
            detail: "Not Found".to_string(),
        }),
    )
        .into_response()
}

/// The same path with its trailing slash toggled; `/` has none.
fn alternate_path(path: &str) -> Option<String> {
    match path.strip_suffix('/') {
        Some("") => None,
        Some(trimmed) => Some(trimmed.to_string()),
        None => Some(format!("{}/", path)),
    }
}
