// HTTP server setup (Axum REST API)
pub mod app;
pub mod extractors;
pub mod middleware;
pub mod routes;

pub use app::*;
