use std::sync::Arc;

use common::storage::filesystem::FilesystemImageStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::notify::LogNotifier;
use server::state::AppState;
use server::{database, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;
    seed::ensure_admin_user(&db, &config.auth).await?;

    let images = FilesystemImageStore::new(
        config.storage.root_dir.clone(),
        config.storage.max_image_size,
    )
    .await?;

    let state = AppState {
        db,
        images: Arc::new(images),
        notifier: Arc::new(LogNotifier),
        config: config.clone(),
    };

    let app = server::build_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    let addr = listener.local_addr()?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
