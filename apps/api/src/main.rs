mod board;
mod catalog;
mod config;
mod errors;
mod layout;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::board::{Sampler, SeededSampler, ThreadRngSampler};
use crate::catalog::{FsThemeStore, S3ThemeStore, ThemeCatalog, ThemeStore};
use crate::config::{Config, StoreBackend};
use crate::layout::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Bingo API v{}", env!("CARGO_PKG_VERSION"));

    let store = build_theme_store(&config).await;
    let catalog = ThemeCatalog::new(store, Duration::from_secs(config.store_timeout_secs));
    info!("Theme store initialized (backend: {})", catalog.backend());

    match catalog.list().await {
        Ok(themes) if themes.is_empty() => warn!("No themes available"),
        Ok(themes) => {
            for theme in &themes {
                info!("Available theme {}: {}", theme.id, theme.title);
            }
        }
        Err(e) => warn!("Could not list themes at startup: {e}"),
    }

    let page_config = default_page_config(config.page_size)
        .with_font_range(config.font_max_pt, config.font_min_pt);
    info!(
        "Page config: {}x{}pt, cell text {}-{}pt",
        page_config.page_width,
        page_config.page_height,
        page_config.min_font_size,
        page_config.max_font_size
    );

    let sampler: Arc<dyn Sampler> = match config.board_seed {
        Some(seed) => {
            warn!("BOARD_SEED is set: boards are reproducible, not random");
            Arc::new(SeededSampler::new(seed))
        }
        None => Arc::new(ThreadRngSampler),
    };

    let state = AppState {
        catalog,
        sampler,
        page_config,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the configured theme store: a local directory or an S3/MinIO bucket.
async fn build_theme_store(config: &Config) -> Arc<dyn ThemeStore> {
    match &config.store {
        StoreBackend::Fs { dir } => Arc::new(FsThemeStore::new(dir)),
        StoreBackend::S3 {
            bucket,
            prefix,
            endpoint,
            region,
            access_key_id,
            secret_access_key,
        } => {
            let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(Region::new(region.clone()));
            if let (Some(key_id), Some(secret)) = (access_key_id, secret_access_key) {
                loader = loader.credentials_provider(Credentials::new(
                    key_id,
                    secret,
                    None,
                    None,
                    "bingo-static",
                ));
            }
            if let Some(endpoint) = endpoint {
                loader = loader.endpoint_url(endpoint);
            }
            let sdk_config = loader.load().await;

            // MinIO serves buckets by path rather than virtual host.
            let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
                .force_path_style(endpoint.is_some())
                .build();
            let client = aws_sdk_s3::Client::from_conf(s3_config);
            Arc::new(S3ThemeStore::new(client, bucket.clone(), prefix.clone()))
        }
    }
}
