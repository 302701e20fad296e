use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use keystone_admin_rust::auth::PgCredentialStore;
use keystone_admin_rust::config;
use keystone_admin_rust::routes::app;
use keystone_admin_rust::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Keystone Admin API in {:?} mode", config.environment);

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_lazy(&database_url)
        .unwrap_or_else(|e| panic!("invalid DATABASE_URL: {}", e));

    let state = AppState::new(
        Arc::new(PgCredentialStore::new(pool)),
        config.security.jwt_secret.clone(),
        config.security.access_token_ttl_secs,
        config.security.refresh_token_ttl_secs,
    );

    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("KEYSTONE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Keystone Admin API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
