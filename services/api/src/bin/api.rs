//! services/api/src/bin/api.rs

use api_lib::{
    adapters::db::DbAdapter,
    analysis::AnalysisService,
    config::Config,
    error::ApiError,
    web::{
        ab_tests_handler,
        auth::{login_handler, logout_handler, me_handler, signup_handler, update_profile_handler},
        delete_analysis_handler, get_analysis_handler, get_campaign_handler, get_creative_handler,
        list_analyses_handler, list_campaigns_handler, list_creatives_handler,
        middleware::require_auth, performance_handler, rest::ApiDoc, state::AppState,
        submit_analysis_handler,
    },
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let db_adapter = Arc::new(DbAdapter::new(db_pool.clone()));
    info!("Running database migrations...");
    db_adapter.run_migrations().await?;
    info!("Database migrations complete.");

    // --- 3. Build the Analysis Service & Shared AppState ---
    let analysis = Arc::new(AnalysisService::new(Duration::from_millis(
        config.analysis_delay_ms,
    )));

    let app_state = Arc::new(AppState {
        profiles: db_adapter,
        analysis: analysis.clone(),
        config: config.clone(),
    });

    let cors_origin = config
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN: {}", e)))?;
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 4. Create the Web Router ---
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/me", get(me_handler))
        .route("/auth/profile", put(update_profile_handler))
        .route("/analyses", post(submit_analysis_handler).get(list_analyses_handler))
        .route(
            "/analyses/{id}",
            get(get_analysis_handler).delete(delete_analysis_handler),
        )
        .route("/campaigns", get(list_campaigns_handler))
        .route("/campaigns/{id}", get(get_campaign_handler))
        .route("/creatives", get(list_creatives_handler))
        .route("/creatives/{id}", get(get_creative_handler))
        .route("/analytics/performance", get(performance_handler))
        .route("/analytics/ab-tests", get(ab_tests_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Combine API routes
    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(analysis))
        .await?;

    Ok(())
}

/// Waits for ctrl-c, then cancels every analysis completion still pending
/// so the process can exit without stray tasks firing mid-teardown.
async fn shutdown_signal(analysis: Arc<AnalysisService>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received.");
    analysis.shutdown().await;
}
