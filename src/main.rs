//! Moodwrap server entrypoint.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{fmt, EnvFilter};

use moodwrap::adapters::auth::JwtSessionValidator;
use moodwrap::adapters::cache::{InMemoryViewCache, RedisViewCache};
use moodwrap::adapters::http::{build_router, AppDependencies};
use moodwrap::adapters::memory::{InMemoryStore, MemoryGateway};
use moodwrap::adapters::postgres::{self, PgGateway, PgPrivilegedGateway};
use moodwrap::adapters::postgrest::{RestGateway, RestPrivilegedGateway};
use moodwrap::config::{AppConfig, CacheBackend, CacheConfig, GatewayBackend};
use moodwrap::ports::{DataGateway, PrivilegedGateway, ViewCache};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("moodwrap: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let (gateway, privileged) = build_gateways(&config).await?;
    let cache = build_cache(&config.cache).await?;

    let deps = AppDependencies {
        gateway,
        privileged,
        cache,
        session_validator: Arc::new(JwtSessionValidator::new(&config.auth)),
        gamification: config.gamification.clone(),
    };
    let app = build_router(deps, &config.server);

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    tracing::info!(
        %address,
        environment = ?config.server.environment,
        gateway = ?config.gateway.backend,
        "Server running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        fmt().json().with_env_filter(filter).init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

async fn build_gateways(
    config: &AppConfig,
) -> Result<(Arc<dyn DataGateway>, Arc<dyn PrivilegedGateway>), BoxError> {
    match config.gateway.backend {
        GatewayBackend::Rest => {
            let gateway: Arc<dyn DataGateway> = Arc::new(RestGateway::new(&config.gateway)?);
            let privileged: Arc<dyn PrivilegedGateway> =
                Arc::new(RestPrivilegedGateway::new(&config.gateway)?);
            Ok((gateway, privileged))
        }
        GatewayBackend::Postgres => {
            let pool = postgres::connect(&config.database).await?;
            let gateway: Arc<dyn DataGateway> = Arc::new(PgGateway::new(pool.clone()));
            let privileged: Arc<dyn PrivilegedGateway> = Arc::new(PgPrivilegedGateway::new(pool));
            Ok((gateway, privileged))
        }
        GatewayBackend::Memory => {
            tracing::warn!("Using the in-memory gateway; data is lost on restart");
            let memory = Arc::new(MemoryGateway::new(Arc::new(InMemoryStore::seeded())));
            let gateway: Arc<dyn DataGateway> = memory.clone();
            let privileged: Arc<dyn PrivilegedGateway> = memory;
            Ok((gateway, privileged))
        }
    }
}

async fn build_cache(config: &CacheConfig) -> Result<Arc<dyn ViewCache>, BoxError> {
    let cache: Arc<dyn ViewCache> = match config.backend {
        CacheBackend::Memory => Arc::new(InMemoryViewCache::new(config.ttl())),
        CacheBackend::Redis => {
            Arc::new(RedisViewCache::connect(&config.url, config.ttl_secs).await?)
        }
    };
    Ok(cache)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
