//! HTTP server: router, shared state, and route handlers.

pub mod app;
pub mod routes;

pub use app::{build_app, build_router, AppState};
