//! Version 1 of the API, mounted under [`PREFIX`]

use axum::Json;

use crate::api::handlers;
use crate::api::routes::{Route, RouteTable};
use crate::types::Message;
use crate::Result;

pub mod items;
pub mod users;

pub const PREFIX: &str = "/api/v1";

/// Health route first, then items, then users.
///
/// Fails when two routers bind the same method and path.
pub fn build_route_table() -> Result<RouteTable> {
    RouteTable::new("")?
        .route(Route::get("/", read_api_root))?
        .include(items::router()?)?
        .include(users::router()?)
}

/// Health check under the API prefix
#[utoipa::path(
    get,
    path = "/api/v1/",
    responses((status = 200, description = "Service is up", body = Message))
)]
pub async fn read_api_root() -> Json<Message> {
    handlers::read_root().await
}
