// Main entry point for API server

use std::sync::Arc;

use anthropic_client::AnthropicClient;
use anyhow::{Context, Result};
use server_core::domains::auth::JwtService;
use server_core::kernel::{AnthropicAdapter, ServerDeps, SupabaseAuthAdapter, SupabaseStorageAdapter};
use server_core::server::{build_app, AppOptions};
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use supabase_client::SupabaseClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    let default_filter = if config.debug {
        "debug,server_core=trace,sqlx=warn"
    } else {
        "info,server_core=debug,sqlx=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        app = %config.app_name,
        version = %config.app_version,
        environment = %config.environment,
        "Starting API"
    );

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Hosted services
    let supabase = Arc::new(SupabaseClient::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
        config.supabase_service_key.clone(),
    ));
    let ai = AnthropicAdapter::new(
        AnthropicClient::new(config.anthropic_api_key.clone())
            .context("Failed to create Anthropic client")?,
        config.anthropic_model.clone(),
    );

    let deps = ServerDeps::new(
        pool,
        Arc::new(ai),
        Arc::new(SupabaseAuthAdapter::new(supabase.clone())),
        Arc::new(SupabaseStorageAdapter::new(
            supabase,
            config.storage_bucket.clone(),
        )),
        Arc::new(JwtService::new(&config.supabase_jwt_secret)),
        config.max_file_size_bytes(),
    );

    // Build application
    let app = build_app(
        deps,
        AppOptions {
            app_name: config.app_name.clone(),
            version: config.app_version.clone(),
            environment: config.environment.clone(),
            cors_origins: config.cors_origins.clone(),
            rate_limit: Some((config.rate_limit_requests, config.rate_limit_period_secs)),
        },
    );

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
