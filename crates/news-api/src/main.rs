//! 뉴스 포털 API 서버 진입점.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use news_api::repository::{DocumentStore, MemoryDocumentStore, PgDocumentStore};
use news_api::services::{StripeClient, StripeConfig};
use news_api::{create_router, AppState, JwtConfig};
use news_core::{init_logging, AppConfig, LogConfig};
use secrecy::{ExposeSecret, SecretString};
use tracing::{error, info, warn};

/// 설정에 따라 문서 저장소 생성.
///
/// 데이터베이스 설정이 없으면 메모리 저장소를 사용합니다.
async fn create_store(config: &AppConfig) -> anyhow::Result<Arc<dyn DocumentStore>> {
    let Some(url) = config.database.connection_url() else {
        warn!("No database configured, using in-memory document store (data is lost on restart)");
        return Ok(Arc::new(MemoryDocumentStore::new()));
    };

    let store = PgDocumentStore::connect(
        url.expose_secret(),
        config.database.max_connections,
        Duration::from_secs(config.database.connect_timeout_secs),
    )
    .await
    .context("failed to connect to PostgreSQL")?;
    store.migrate().await.context("failed to run migrations")?;

    info!(
        max_connections = config.database.max_connections,
        "PostgreSQL document store ready"
    );
    Ok(Arc::new(store))
}

/// 애플리케이션 상태 생성.
async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let secret = config
        .auth
        .access_token_secret
        .as_ref()
        .context("auth.access_token_secret (ACCESS_TOKEN_SECRET) is required")?;
    let jwt = JwtConfig::from_secret(secret.expose_secret(), config.auth.token_ttl_secs);

    let store = create_store(config).await?;
    let mut state =
        AppState::new(store, jwt).with_admin_enforcement(config.auth.enforce_admin_routes);

    match &config.payments.stripe_secret {
        Some(key) => {
            let stripe = StripeConfig::new(SecretString::new(key.expose_secret().into()))
                .with_api_base(config.payments.api_base.as_str());
            state = state.with_payments(
                Arc::new(StripeClient::new(stripe)),
                config.payments.currency.as_str(),
            );
        }
        None => warn!("STRIPE_SECRET not set, payment intents are disabled"),
    }

    if !state.enforce_admin_routes {
        warn!(
            "Privilege escalation and article status routes are not guarded by an admin check \
             (set auth.enforce_admin_routes = true to require one)"
        );
    }

    Ok(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default().context("failed to load configuration")?;

    init_logging(LogConfig::from(&config.logging))
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    info!("Starting News API server...");

    let addr = config.server.socket_addr().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. server.host, PORT 설정을 확인하세요."
        );
        e
    })?;

    let state = Arc::new(create_app_state(&config).await?);
    info!(
        version = %state.version,
        store = state.store.backend(),
        has_payments = state.has_payments(),
        enforce_admin_routes = state.enforce_admin_routes,
        "Application state initialized"
    );

    let app = create_router(state, &config.server);

    info!(%addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");
    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 반환합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
