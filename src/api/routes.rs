//! Immutable route table assembled once at startup
//!
//! Routers declare their bindings as [`Route`]s inside a [`RouteTable`]; tables are
//! merged with [`RouteTable::include`] and only turned into an [`axum::Router`] after
//! every binding has been checked for collisions. Nothing is registered afterwards.

use axum::{
    handler::Handler,
    http::Method,
    routing::{self, MethodRouter},
    Router,
};

use crate::{Error, Result};

/// A single (method, path) -> handler binding.
#[derive(Clone)]
pub struct Route {
    method: Method,
    path: String,
    tags: Vec<&'static str>,
    handler: MethodRouter,
}

impl Route {
    /// Bind `handler` to `GET path`.
    pub fn get<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        Self {
            method: Method::GET,
            path: path.into(),
            tags: Vec::new(),
            handler: routing::get(handler),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn tags(&self) -> &[&'static str] {
        &self.tags
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("tags", &self.tags)
            .finish_non_exhaustive()
    }
}

/// Ordered set of routes sharing a path prefix and tags.
#[derive(Clone, Debug, Default)]
pub struct RouteTable {
    prefix: String,
    tags: Vec<&'static str>,
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create a table whose routes are registered under `prefix`.
    ///
    /// The prefix is either empty or starts with `/` and does not end with one.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if !prefix.is_empty() && (!prefix.starts_with('/') || prefix.ends_with('/')) {
            return Err(Error::invalid_path(format!(
                "prefix must start with '/' and must not end with '/': {:?}",
                prefix
            )));
        }

        Ok(Self {
            prefix,
            tags: Vec::new(),
            routes: Vec::new(),
        })
    }

    /// Tag every route registered through this table.
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tags.push(tag);
        self
    }

    /// Register a route under this table's prefix.
    pub fn route(mut self, mut route: Route) -> Result<Self> {
        if !route.path.starts_with('/') {
            return Err(Error::invalid_path(format!(
                "route path must start with '/': {:?}",
                route.path
            )));
        }

        route.path = format!("{}{}", self.prefix, route.path);
        let mut tags = self.tags.clone();
        tags.extend(route.tags.iter().copied());
        route.tags = tags;

        self.ensure_vacant(&route.method, &route.path)?;
        self.routes.push(route);
        Ok(self)
    }

    /// Merge every route of `other` (already carrying its own prefix) into this table.
    pub fn include(self, other: RouteTable) -> Result<Self> {
        other.routes.into_iter().try_fold(self, RouteTable::route)
    }

    /// Fail with [`Error::RouteCollision`] if `method path` is already bound.
    pub fn ensure_vacant(&self, method: &Method, path: &str) -> Result<()> {
        if self
            .routes
            .iter()
            .any(|existing| existing.method == *method && existing.path == path)
        {
            return Err(Error::RouteCollision {
                method: method.clone(),
                path: path.to_string(),
            });
        }
        Ok(())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Build the axum router. Routes sharing a path are merged into one method router.
    pub fn into_router(self) -> Router {
        self.routes
            .into_iter()
            .fold(Router::new(), |router, route| {
                router.route(&route.path, route.handler)
            })
    }
}
