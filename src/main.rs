use std::fs::OpenOptions;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod domains;
mod shared;
mod system;

use domains::user::{routes, state::AuthState};
use shared::state::SharedState;
use system::{
    cache::{spawn_purge_task, InMemorySessionCache},
    config::{AppConfig, LogConfig},
    database::{get_database, DatabaseService, MongoUserStore},
    store::{InMemoryUserStore, UserStore},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = AppConfig::load()?;
    init_tracing(&config.log)?;

    info!(
        environment = %config.environment,
        log_level = %config.log.level,
        "configuration loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .enable_all()
        .build()?;

    runtime.block_on(run(config))
}

fn init_tracing(log: &LogConfig) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    match &log.file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    Ok(())
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Pick the user store: MongoDB when configured, otherwise process memory
    let (user_store, db_manager) = if config.databases.is_empty() {
        warn!("no database configured, users are kept in memory");
        let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        (store, None)
    } else {
        let manager = DatabaseService::initialize(&config).await?;
        let database = get_database(&manager, None).await?;
        let store: Arc<dyn UserStore> = Arc::new(MongoUserStore::new(&database));
        (store, Some(manager))
    };

    let session_cache = Arc::new(InMemorySessionCache::new());
    spawn_purge_task(
        Arc::clone(&session_cache),
        Duration::from_secs(config.cache.purge_interval_seconds.max(1)),
    );

    let addr = config.bind_address();
    let shared_state = Arc::new(SharedState {
        config: Arc::new(config),
        user_store,
        session_cache,
        db_manager,
    });
    let auth_state = Arc::new(AuthState::new(shared_state));

    let app = routes::router(auth_state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
}
