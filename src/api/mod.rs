//! HTTP application root

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    http::{Method, Uri},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::Result;

pub mod docs;
pub mod handlers;
pub mod routes;
pub mod v1;

pub use routes::{Route, RouteTable};

/// Every route the application serves.
#[derive(Debug, Clone)]
pub struct Composition {
    /// Health route plus the API under `/api/v1`; what the schema describes.
    pub canonical: RouteTable,
    /// `canonical` plus the optional root-segment mount.
    pub served: RouteTable,
    /// Documentation pages and the schema document.
    pub docs: docs::Documentation,
    /// Normalised root segment the API is additionally mounted under.
    pub root_path: Option<String>,
}

/// Assemble the route tables for `config`.
///
/// Fails on an invalid root segment or documentation path, or on a route collision.
pub fn compose(config: &AppConfig) -> Result<Composition> {
    let root_path = config.root_path()?;
    let api = v1::build_route_table()?;

    let canonical = RouteTable::new("")?
        .route(Route::get("/", handlers::read_root))?
        .include(RouteTable::new(v1::PREFIX)?.include(api.clone())?)?;

    let mut served = canonical.clone();
    if let Some(segment) = &root_path {
        let mount = format!("/{}{}", segment, v1::PREFIX);
        served = served.include(RouteTable::new(mount)?.include(api)?)?;
    }

    let schema = docs::openapi(&config.app, root_path.as_deref());
    let docs = docs::router(&config.app, schema)?;
    for path in &docs.paths {
        served.ensure_vacant(&Method::GET, path)?;
    }

    Ok(Composition {
        canonical,
        served,
        docs,
        root_path,
    })
}

/// Build the application: composed routes, not-found handling, tracing and a
/// permissive cross-origin policy covering every response.
pub fn create_app(config: &AppConfig) -> Result<Router> {
    let composition = compose(config)?;

    let known: handlers::KnownPaths = Arc::new(
        composition
            .served
            .routes()
            .iter()
            .map(|route| route.path().to_string())
            .chain(composition.docs.paths.iter().cloned())
            .collect::<HashSet<_>>(),
    );

    tracing::info!(
        routes = composition.served.len(),
        docs = ?composition.docs.paths,
        root_path = ?composition.root_path,
        "Composed application routes",
    );
    for route in composition.served.routes() {
        tracing::debug!(method = %route.method(), path = route.path(), "Registered route");
    }

    Ok(composition
        .served
        .into_router()
        .merge(composition.docs.router)
        .fallback(move |uri: Uri| {
            let known = known.clone();
            async move { handlers::not_found(&known, &uri) }
        })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()))
}

/// Run `app` as a long-lived HTTP server on `host:port`.
pub async fn serve(app: Router, host: &str, port: u16) -> Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "Listening for HTTP traffic");

    axum::serve(listener, app).await?;
    Ok(())
}
