//! 인증 및 권한 부여.
//!
//! JWT 기반 인증과 계정 문서 기반 관리자 권한 확인을 제공합니다.
//!
//! # 구성 요소
//!
//! - [`Claims`]: JWT 페이로드 구조체
//! - [`JwtAuth`]: 토큰 검증 추출기 (검증된 신원만 핸들러에 전달)
//! - [`AdminAuth`]: 토큰 검증 + 관리자 권한 추출기
//! - [`require_admin`]: 라우트 묶음용 관리자 검사 미들웨어
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn protected_handler(
//!     JwtAuth(claims): JwtAuth,
//! ) -> impl IntoResponse {
//!     format!("Hello, {:?}!", claims.email)
//! }
//! ```

mod jwt;
mod middleware;
mod roles;

pub use jwt::{
    create_token, decode_token, issue_token, Claims, JwtConfig, JwtError, TokenResponse,
    DEFAULT_TOKEN_TTL_SECS,
};
pub use middleware::{bearer_token, require_admin, AdminAuth, AuthError, JwtAuth};
pub use roles::{authorize_admin, require_same_identity};
