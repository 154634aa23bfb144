//! `/users` collection

use axum::Json;

use crate::api::routes::{Route, RouteTable};
use crate::types::{sample_records, Record};
use crate::Result;

pub fn router() -> Result<RouteTable> {
    RouteTable::new("/users")?
        .tag("users")
        .route(Route::get("/", read_users))
}

/// List every user
#[utoipa::path(
    get,
    path = "/api/v1/users/",
    tag = "users",
    responses((status = 200, description = "All users", body = [Record]))
)]
pub async fn read_users() -> Json<Vec<Record>> {
    Json(sample_records())
}
