use caravan::config::AppConfig;
use caravan::db::{init_pool, run_migrations};
use caravan::error::AppError;
use caravan::routes::create_router;
use caravan::services::{catalog::CatalogService, storage::StorageService};
use caravan::state::AppState;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;
    let db = init_pool(&config.database_url).await?;

    if let Err(err) = run_migrations(&db).await {
        error!("migration failed: {err:?}");
        return Err(err);
    }

    let catalog = CatalogService::load(&config.data_root).await;
    let storage = StorageService::new(db.clone());
    info!(
        stored_trips = storage.count_custom_trips().await?,
        "custom trip storage ready"
    );

    let state = AppState::new(config.clone(), db.clone(), catalog, storage);

    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,caravan=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
