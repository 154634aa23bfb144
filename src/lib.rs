//! serverless-api - a minimal HTTP API for function-as-a-service hosts
//!
//! The same composed [`axum::Router`] is served either by a long-running server or,
//! through [`lambda`], once per invocation by the function host:
//! - `GET /` and `GET /api/v1/` health route
//! - `GET /api/v1/items/` and `GET /api/v1/users/` collection endpoints
//! - `/docs`, `/redoc` and `/openapi.json` documentation
//! - permissive cross-origin headers on every response

pub mod api;
pub mod config;
pub mod error;
pub mod lambda;
pub mod types;

pub use api::create_app;
pub use error::{Error, Result};
