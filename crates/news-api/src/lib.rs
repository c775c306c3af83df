//! 뉴스 포털 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - JWT 발급 및 검증, 계정 기반 관리자 권한 확인
//! - 문서 저장소 (PostgreSQL JSONB / 메모리)
//! - Stripe 결제 의도 연동
//! - 헬스 체크 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`auth`]: JWT 인증 및 권한 관리
//! - [`repository`]: 문서 저장소 및 Repository
//! - [`services`]: 외부 결제 대행사 연동

pub mod auth;
pub mod error;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use axum::Router;
use news_core::ServerConfig;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use auth::{AdminAuth, AuthError, Claims, JwtAuth, JwtConfig};
pub use error::{ApiErrorResponse, ApiResult};
pub use routes::create_api_router;
pub use state::AppState;

/// CORS 레이어 생성.
///
/// 허용 origin 목록이 비어 있으면 모든 origin을 허용합니다.
/// 목록이 있을 때만 자격 증명(credentials)을 허용합니다.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<_> = origins
        .iter()
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let (allow_origin, allow_credentials) = if allowed.is_empty() {
        if !origins.is_empty() {
            warn!("CORS origins are configured but none are valid, allowing any");
        }
        (AllowOrigin::any(), false)
    } else {
        info!("CORS configured with {} allowed origins", allowed.len());
        (AllowOrigin::list(allowed), true)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .allow_credentials(allow_credentials)
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
///
/// API 라우터에 요청 추적, 전역 타임아웃(408), CORS 레이어를 적용합니다.
pub fn create_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    create_api_router(&state)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(cors_layer(&config.cors_origins))
}
