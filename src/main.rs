use std::str::FromStr;
use std::sync::Arc;

use mockable::DefaultClock;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use taskmanager_backend::api;
use taskmanager_backend::config::AppConfig;
use taskmanager_backend::db::SqliteTaskStore;
use taskmanager_backend::services::TaskService;
use taskmanager_backend::state::AppState;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "taskmanager_backend=debug,tower_http=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    let store = SqliteTaskStore::new(pool);
    store.migrate().await?;

    let tasks = TaskService::new(Arc::new(store), Arc::new(DefaultClock));
    let app = api::app(AppState { tasks }, config.static_dir.as_deref());

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
