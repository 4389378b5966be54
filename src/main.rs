use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use sqlx::migrate::Migrator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_core::adapters::{InMemoryTransactionStore, PostgresTransactionStore};
use storefront_core::config::Config;
use storefront_core::payments::BoldClient;
use storefront_core::ports::TransactionStore;
use storefront_core::services::WebhookNotifier;
use storefront_core::use_cases::ReconcileWebhook;
use storefront_core::{create_app, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let store: Arc<dyn TransactionStore> = match &config.database_url {
        Some(url) => {
            let pool = db::create_pool(url).await?;

            let migrator = Migrator::new(Path::new("./migrations")).await?;
            migrator.run(&pool).await?;
            tracing::info!("database migrations completed");

            Arc::new(PostgresTransactionStore::new(pool))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory transaction store");
            Arc::new(InMemoryTransactionStore::new())
        }
    };

    let notifier = Arc::new(WebhookNotifier::new(
        config.notification_webhook_url.clone(),
        config.admin_phone.clone(),
    ));
    let reconciler = Arc::new(ReconcileWebhook::new(store, notifier));
    let bold = BoldClient::new(config.bold_api_url.clone(), config.bold_api_key.clone());

    let state = AppState {
        config: Arc::new(config.clone()),
        reconciler,
        bold,
    };

    let app = create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
