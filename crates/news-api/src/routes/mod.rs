//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//! 경로는 기존 클라이언트와 호환되도록 버전 접두사 없이 노출됩니다.
//!
//! # 라우트 구조
//!
//! - `/`, `/demo`, `/trending` - 배너 및 피드
//! - `/health`, `/health/ready` - 헬스 체크
//! - `/jwt` - 토큰 발급
//! - `/users`, `/users/admin/{email}`, `/user/admin/{id}` - 계정
//! - `/articles` - 기사 및 상태 변경
//! - `/publisher`, `/publishers` - 발행처
//! - `/views` - 조회 기록
//! - `/plans` - 구독 플랜
//! - `/create-payment-intent`, `/payments` - 결제

pub mod articles;
pub mod feeds;
pub mod health;
pub mod payments;
pub mod plans;
pub mod publishers;
pub mod token;
pub mod users;
pub mod views;

pub use articles::{article_admin_router, articles_router};
pub use feeds::feeds_router;
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use payments::{payments_router, ClientSecretResponse, PaymentIntentRequest};
pub use plans::plans_router;
pub use publishers::publishers_router;
pub use token::token_router;
pub use users::{user_admin_router, users_router, AdminStatusResponse, RegistrationResponse};
pub use views::{views_router, ViewsQuery};

use std::sync::Arc;

use axum::{middleware, Router};

use crate::auth::require_admin;
use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// `enforce_admin_routes`가 켜져 있으면 권한 상승 및 기사 상태 변경
/// 라우트 앞에 관리자 검사를 둡니다.
pub fn create_api_router(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let admin_routes = user_admin_router().merge(article_admin_router());
    let admin_routes = if state.enforce_admin_routes {
        admin_routes.route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
    } else {
        admin_routes
    };

    Router::new()
        .merge(feeds_router())
        .nest("/health", health_router())
        .merge(token_router())
        .merge(users_router())
        .merge(articles_router())
        .merge(publishers_router())
        .merge(views_router())
        .merge(plans_router())
        .merge(payments_router())
        .merge(admin_routes)
}
