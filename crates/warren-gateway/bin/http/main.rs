mod cli;

use crate::cli::{LogFormatArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use warren_core::RecordStore;
use warren_gateway::{App, AppState};
use warren_generator::RandomGenerator;
use warren_redirector::RedirectorService;
use warren_shortener::{ShortenerService, ShortenerSettings};
use warren_storage::{FileSystemStore, InMemoryStore, RedisStore, TimeoutStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    init_tracing(config.log_format);

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        code_length = config.code_length,
        max_attempts = config.max_attempts,
        "starting gateway server"
    );

    let store = TimeoutStore::new(
        open_store(&config).await?,
        Duration::from_millis(config.store_timeout_ms),
    );
    let generator =
        RandomGenerator::new(config.code_length).context("failed to initialise code generator")?;
    let settings = ShortenerSettings::builder()
        .max_attempts(config.max_attempts)
        .build();

    let shortener = ShortenerService::with_settings(store.clone(), generator, settings);
    let redirector = RedirectorService::new(store);
    let state = AppState::new(
        Arc::new(shortener),
        Arc::new(redirector),
        config.public_base_url,
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

fn init_tracing(format: LogFormatArg) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormatArg::Text => builder.init(),
        LogFormatArg::Json => builder.json().init(),
    }
}

async fn open_store(config: &CLI) -> anyhow::Result<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(InMemoryStore::new()),
        StorageBackendArg::Filesystem => {
            let dir = config
                .data_dir
                .as_ref()
                .context("data dir is required when storage backend is filesystem")?;
            Arc::new(FileSystemStore::open(dir).await?)
        }
        StorageBackendArg::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("redis url is required when storage backend is redis")?;
            Arc::new(RedisStore::connect(url).await?)
        }
    };
    Ok(store)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
