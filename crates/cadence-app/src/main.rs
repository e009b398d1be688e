use std::sync::Arc;

use salvo::conn::TcpListener;
use salvo::{Listener, Router};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

use cadence_app::api::routes;
use cadence_app::state::{AppState, AppStateHandler};
use cadence_core::config::load_config;
use cadence_db::db::connection::{create_pool, run_migrations};
use cadence_db::repo::{PgEventStore, PgUserStore};
use cadence_service::auth::token::TokenIssuer;
use cadence_service::notify::NotificationSender;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting Cadence calendar API server");

    let config = load_config()?;

    tracing::info!("Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    run_migrations(&config.database.url).await?;

    let pool = create_pool(
        &config.database.url,
        u32::from(config.database.max_connections),
    )
    .await?;

    tracing::info!("Database connection pool created.");

    let state = AppState {
        events: Arc::new(PgEventStore::new(pool.clone())),
        users: Arc::new(PgUserStore::new(pool)),
        tokens: TokenIssuer::from_settings(&config.auth),
        notifications: NotificationSender::from_settings(&config.notifications)?,
    };

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let acceptor = TcpListener::new(bind_addr.clone()).bind().await;

    let router = Router::new().hoop(AppStateHandler { state }).push(routes());

    tracing::info!("Server listening on {bind_addr}");

    salvo::Server::new(acceptor).serve(router).await;

    Ok(())
}
