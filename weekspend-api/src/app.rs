/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use weekspend_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let app = build_router(AppState::new(pool, config));
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use weekspend_shared::auth::session::SessionPolicy;

use crate::{config::Config, middleware::session};

/// Shared application state
///
/// Cloned into each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Session expiry/renewal parameters
    pub session_policy: SessionPolicy,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            session_policy: SessionPolicy::default(),
        }
    }
}

/// Builds the complete Axum router
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # liveness (public)
/// └── /v1/
///     ├── /auth/sign-in             # PIN sign-in (public)
///     ├── /auth/sign-out            # session required below this line
///     ├── /user                     # GET current, PUT reassign
///     ├── /transactions             # CRUD + weekly listing
///     ├── /transactions/spent       # one week's total
///     ├── /transactions/spent-per-week  # yearly grouped summary
///     ├── /presets                  # CRUD
///     └── /budget                   # GET by week, PUT upsert
/// ```
///
/// The session cookie is resolved for every request (including public
/// routes, so an expired cookie is lazily cleaned up no matter where the
/// client lands); only the protected tree enforces its presence.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let sign_in_routes = Router::new().route("/auth/sign-in", post(routes::auth::sign_in));

    let protected_routes = Router::new()
        .route("/auth/sign-out", post(routes::auth::sign_out))
        .route("/user", get(routes::user::get_user))
        .route("/user", put(routes::user::change_user))
        .route("/transactions", get(routes::transactions::list_by_week))
        .route("/transactions", post(routes::transactions::create))
        .route("/transactions/spent", get(routes::transactions::spent_by_week))
        .route(
            "/transactions/spent-per-week",
            get(routes::transactions::spent_per_week),
        )
        .route("/transactions/:id", put(routes::transactions::update))
        .route("/transactions/:id", delete(routes::transactions::remove))
        .route("/presets", get(routes::presets::list))
        .route("/presets", post(routes::presets::create))
        .route("/presets/:id", put(routes::presets::update))
        .route("/presets/:id", delete(routes::presets::remove))
        .route("/budget", get(routes::budget::get_by_week))
        .route("/budget", put(routes::budget::upsert))
        .layer(axum::middleware::from_fn(session::require_session));

    let v1_routes = Router::new().merge(sign_in_routes).merge(protected_routes);

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session::session_layer,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
