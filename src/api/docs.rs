//! Generated API documentation: the OpenAPI document and the pages rendering it

use axum::{routing::get, Json, Router};
use utoipa::openapi::{server::Server, OpenApi as OpenApiDoc};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{handlers, v1};
use crate::config::AppSection;
use crate::types::{Message, Record};
use crate::Result;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::read_root,
        v1::read_api_root,
        v1::items::read_items,
        v1::users::read_users,
    ),
    components(schemas(Record, Message)),
    tags(
        (name = "items", description = "Item collection"),
        (name = "users", description = "User collection"),
    )
)]
pub struct ApiDoc;

/// The OpenAPI document with the configured metadata.
///
/// A root segment is published as the server URL so requests built from the document
/// reach the segment mount.
pub fn openapi(app: &AppSection, root_path: Option<&str>) -> OpenApiDoc {
    let mut doc = ApiDoc::openapi();
    doc.info.title = app.title.clone();
    doc.info.version = app.version.clone();
    if let Some(segment) = root_path {
        doc.servers = Some(vec![Server::new(format!("/{}", segment))]);
    }
    doc
}

/// Documentation routes and every exact path they occupy.
#[derive(Debug, Clone, Default)]
pub struct Documentation {
    pub router: Router,
    pub paths: Vec<String>,
}

/// Serve `schema` at the configured paths. An empty `openapi_url` disables everything.
pub fn router(app: &AppSection, schema: OpenApiDoc) -> Result<Documentation> {
    let Some(openapi_url) = app.openapi_url()? else {
        return Ok(Documentation::default());
    };

    let mut paths = vec![openapi_url.to_string()];

    // Swagger UI serves the schema itself; without it the document gets a plain route
    let mut router = match app.docs_url()? {
        Some(docs_url) => {
            paths.push(docs_url.to_string());
            paths.push(format!("{}/", docs_url));
            Router::new().merge(
                SwaggerUi::new(docs_url.to_string()).url(openapi_url.to_string(), schema.clone()),
            )
        }
        None => {
            let document = schema.clone();
            Router::new().route(
                openapi_url,
                get(move || {
                    let document = document.clone();
                    async move { Json(document) }
                }),
            )
        }
    };

    if let Some(redoc_url) = app.redoc_url()? {
        paths.push(redoc_url.to_string());
        router = router.merge(Redoc::with_url(redoc_url.to_string(), schema));
    }

    Ok(Documentation { router, paths })
}
