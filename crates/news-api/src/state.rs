//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::JwtConfig;
use crate::repository::DocumentStore;
use crate::services::PaymentProcessor;

/// 기본 결제 통화.
pub const DEFAULT_CURRENCY: &str = "usd";

/// 애플리케이션 공유 상태.
///
/// Axum의 State extractor를 통해 핸들러에 주입됩니다.
#[derive(Clone)]
pub struct AppState {
    /// 문서 저장소 (PostgreSQL 또는 메모리)
    pub store: Arc<dyn DocumentStore>,

    /// JWT 서명/검증 설정
    pub jwt: JwtConfig,

    /// 결제 대행사 (미설정 시 결제 의도 생성 불가)
    pub payments: Option<Arc<dyn PaymentProcessor>>,

    /// 결제 의도 통화
    pub currency: String,

    /// 관리자 전용 라우트에 권한 검사 적용 여부
    pub enforce_admin_routes: bool,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// 결제 대행사 없이, 관리자 라우트 검사 비활성 상태로 시작합니다.
    pub fn new(store: Arc<dyn DocumentStore>, jwt: JwtConfig) -> Self {
        Self {
            store,
            jwt,
            payments: None,
            currency: DEFAULT_CURRENCY.to_string(),
            enforce_admin_routes: false,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 결제 대행사 설정.
    pub fn with_payments(
        mut self,
        processor: Arc<dyn PaymentProcessor>,
        currency: impl Into<String>,
    ) -> Self {
        self.payments = Some(processor);
        self.currency = currency.into();
        self
    }

    /// 관리자 전용 라우트 권한 검사 설정.
    pub fn with_admin_enforcement(mut self, enforce: bool) -> Self {
        self.enforce_admin_routes = enforce;
        self
    }

    /// 결제 대행사 설정 여부 확인.
    pub fn has_payments(&self) -> bool {
        self.payments.is_some()
    }

    /// 서버 가동 시간 (초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

impl FromRef<Arc<AppState>> for JwtConfig {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.jwt.clone()
    }
}

/// 테스트용 JWT 비밀 키.
#[cfg(test)]
pub const TEST_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

/// 테스트용 AppState 생성 헬퍼.
///
/// 메모리 저장소와 테스트 비밀 키로 최소한의 상태를 생성합니다.
#[cfg(test)]
pub fn create_test_state() -> AppState {
    use crate::auth::DEFAULT_TOKEN_TTL_SECS;
    use crate::repository::MemoryDocumentStore;

    AppState::new(
        Arc::new(MemoryDocumentStore::new()),
        JwtConfig::from_secret(TEST_SECRET, DEFAULT_TOKEN_TTL_SECS),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_test_state() {
        let state = create_test_state();
        assert!(!state.has_payments());
        assert!(!state.enforce_admin_routes);
        assert_eq!(state.currency, DEFAULT_CURRENCY);
        assert!(state.uptime_secs() >= 0);
        assert!(state.is_store_healthy().await);
    }

    #[test]
    fn test_admin_enforcement_builder() {
        let state = create_test_state().with_admin_enforcement(true);
        assert!(state.enforce_admin_routes);
    }
}
