//! `/items` collection

use axum::Json;

use crate::api::routes::{Route, RouteTable};
use crate::types::{sample_records, Record};
use crate::Result;

pub fn router() -> Result<RouteTable> {
    RouteTable::new("/items")?
        .tag("items")
        .route(Route::get("/", read_items))
}

/// List every item
#[utoipa::path(
    get,
    path = "/api/v1/items/",
    tag = "items",
    responses((status = 200, description = "All items", body = [Record]))
)]
pub async fn read_items() -> Json<Vec<Record>> {
    Json(sample_records())
}
