use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use domain::services::notification::{NotificationPublisher, TracingPublisher};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{attestation, golf, group_posts, health, participants};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub notifier: Arc<dyn NotificationPublisher>,
}

pub fn create_app(config: Config, pool: PgPool) -> Router {
    create_app_with_publisher(config, pool, Arc::new(TracingPublisher))
}

/// Builds the application router with an explicit notification
/// publisher. Tests inject a mock publisher here.
pub fn create_app_with_publisher(
    config: Config,
    pool: PgPool,
    notifier: Arc<dyn NotificationPublisher>,
) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        notifier,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Group activity routes. Authentication happens in the UserAuth
    // extractor; authorization in the domain guard inside each handler.
    let api_routes = Router::new()
        .route(
            "/api/v1/group-posts",
            post(group_posts::create_group_post).get(group_posts::list_group_posts),
        )
        .route(
            "/api/v1/group-posts/:group_post_id",
            get(group_posts::get_group_post)
                .patch(group_posts::update_group_post)
                .delete(group_posts::delete_group_post),
        )
        .route(
            "/api/v1/group-posts/:group_post_id/participants",
            get(participants::list_participants)
                .post(participants::add_participants)
                .delete(participants::remove_participant),
        )
        .route(
            "/api/v1/group-posts/:group_post_id/attest",
            get(attestation::get_attestation).post(attestation::attest),
        )
        .route(
            "/api/v1/golf/scorecards",
            post(golf::create_scorecard).get(golf::get_scorecard),
        )
        .route(
            "/api/v1/golf/scores",
            post(golf::record_scores).get(golf::list_scores),
        )
        .route("/api/v1/golf/scores/confirm", post(golf::confirm_scores))
        .route("/api/v1/golf/scores/unlock", post(golf::unlock_scores));

    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
