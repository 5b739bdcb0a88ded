use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use ranking_service::{
    handlers::{self, EmojiHandlerState, FeedHandlerState},
    AnimatedPackCache, Config, EmojiPackService, FeedService, InMemoryPostStore,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load config
    let config = Config::from_env().context("Failed to load configuration")?;

    info!(
        "Starting {} on {}:{}",
        config.service.service_name, config.service.host, config.service.port
    );

    let store = match &config.service.seed_file {
        Some(path) => InMemoryPostStore::load_seed_file(path)
            .with_context(|| format!("Failed to seed store from {}", path))?,
        None => {
            warn!("APP_SEED_FILE not set - starting with an empty store");
            InMemoryPostStore::new()
        }
    };
    let store = Arc::new(store);

    // Process-wide state is created here and injected
    let pack_cache = AnimatedPackCache::new(config.cache.clone());

    let feed_state = web::Data::new(FeedHandlerState {
        service: Arc::new(FeedService::new(store.clone(), config.feed.clone())),
    });
    let emoji_state = web::Data::new(EmojiHandlerState {
        service: Arc::new(EmojiPackService::new(store, pack_cache)),
    });

    let bind_addr = (config.service.host.clone(), config.service.port);
    info!("HTTP server listening on {}:{}", bind_addr.0, bind_addr.1);

    HttpServer::new(move || {
        App::new()
            .app_data(feed_state.clone())
            .app_data(emoji_state.clone())
            .configure(handlers::configure)
    })
    .bind(bind_addr)
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")?;

    Ok(())
}
