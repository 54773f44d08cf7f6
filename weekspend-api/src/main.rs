//! # WeekSpend API Server
//!
//! HTTP API for the WeekSpend budgeting app: PIN sign-in with cookie
//! sessions, transaction and preset CRUD, weekly budgets, and week-bucketed
//! spend summaries.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p weekspend-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weekspend_api::{
    app::{build_router, AppState},
    config::Config,
};
use weekspend_shared::db::{
    migrations::run_migrations,
    pool::{create_pool, DatabaseConfig},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weekspend_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "WeekSpend API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(pool, config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
