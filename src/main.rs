mod config;
mod db;
mod routes;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

use crate::services::password::PasswordPolicy;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    let policy = PasswordPolicy { cost: config.hash_cost };

    let pool = db::init_pool(&config.database_url, config.db_max_connections)
        .await
        .expect("database init failed");

    if let Some(seed) = &config.seed_account {
        services::account::ensure_default_account(&pool, policy, &seed.username, &seed.password)
            .await
            .expect("default account seed failed");
    }

    let state = state::AppState::new(pool, policy);
    let app = routes::app(state, config.static_dir.as_deref());

    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "rollcall listening");
    axum::serve(listener, app).await.expect("server failed");
}
