//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::{extract_client_ip, jwt_auth_middleware, replenish_interval_ms};
use crate::server::routes::{
    admin_routes, ai_routes, auth_routes, favorites_routes, files_routes, health_handler,
    inquiries_routes, listings_routes, root_handler, users_routes, MULTIPART_OVERHEAD_BYTES,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
    pub app_name: String,
    pub version: String,
    pub environment: String,
}

/// Router-level settings that do not belong to the dependency container
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub app_name: String,
    pub version: String,
    pub environment: String,
    pub cors_origins: Vec<String>,
    /// (requests, period in seconds) per client IP; `None` disables limiting
    pub rate_limit: Option<(u32, u64)>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            app_name: "IP Marketplace".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
            cors_origins: Vec::new(),
            rate_limit: None,
        }
    }
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, options: AppOptions) -> Router {
    let jwt_service_for_middleware = deps.jwt_service.clone();
    let upload_body_limit = deps.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    let app_state = AppState {
        deps,
        app_name: options.app_name,
        version: options.version,
        environment: options.environment,
    };

    let origins: Vec<HeaderValue> = options
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_credentials(true);

    let api = Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", users_routes())
        .nest("/listings", listings_routes())
        .nest("/files", files_routes(upload_body_limit))
        .nest("/favorites", favorites_routes())
        .nest("/inquiries", inquiries_routes())
        .nest("/ai", ai_routes())
        .nest("/admin", admin_routes());

    let mut router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .nest("/api", api)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service_for_middleware.clone(), req, next)
        }));

    if let Some((requests, period_secs)) = options.rate_limit {
        let config = GovernorConfigBuilder::default()
            .per_millisecond(replenish_interval_ms(requests, period_secs))
            .burst_size(requests.max(1))
            .use_headers() // Key on X-Forwarded-For / X-Real-IP, then peer address
            .finish();

        match config {
            Some(config) => {
                router = router.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => warn!(requests, period_secs, "Invalid rate limit settings, rate limiting disabled"),
        }
    }

    router
        .layer(middleware::from_fn(extract_client_ip))
        .layer(Extension(app_state)) // Add shared state (must be after middlewares that need it)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
