//! Axum용 JWT 인증 추출기 및 미들웨어.
//!
//! - [`JwtAuth`]: `Authorization: Bearer <token>` 검증 후 신원(Claims) 추출
//! - [`AdminAuth`]: 토큰 검증 + 계정 관리자 권한 확인
//! - [`require_admin`]: 라우트 묶음 앞에 관리자 검사를 두는 미들웨어

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{debug, error};

use super::jwt::{decode_token, Claims, JwtConfig, JwtError};
use super::roles::authorize_admin;
use crate::repository::StoreError;
use crate::state::AppState;

/// 인증 스킴.
const BEARER: &str = "bearer";

/// JWT 인증 추출기.
///
/// 검증에 성공한 Claims만 담기며, 같은 요청 안에서는 extensions에 보관된
/// 검증 결과를 재사용합니다.
///
/// # 사용 예시
///
/// ```rust,ignore
/// async fn protected_handler(JwtAuth(claims): JwtAuth) -> impl IntoResponse {
///     format!("Authenticated: {:?}", claims.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JwtAuth(pub Claims);

/// 인증/권한 에러.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("토큰에 신원 정보(email)가 없습니다")]
    MissingIdentity,
    #[error("본인 계정만 조회할 수 있습니다")]
    IdentityMismatch,
    #[error("권한이 부족합니다")]
    InsufficientPermission,
    #[error("계정 조회 실패: {0}")]
    Store(#[from] StoreError),
}

impl AuthError {
    /// HTTP 상태 코드와 에러 코드.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "MISSING_TOKEN"),
            AuthError::InvalidAuthHeader => (StatusCode::UNAUTHORIZED, "INVALID_AUTH_HEADER"),
            AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthError::MissingIdentity => (StatusCode::FORBIDDEN, "MISSING_IDENTITY"),
            AuthError::IdentityMismatch => (StatusCode::FORBIDDEN, "IDENTITY_MISMATCH"),
            AuthError::InsufficientPermission => {
                (StatusCode::FORBIDDEN, "INSUFFICIENT_PERMISSION")
            }
            AuthError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR"),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::TokenExpired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if let AuthError::Store(e) = &self {
            error!(error = %e, "Authorization lookup failed");
        }

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

/// `Authorization` 헤더에서 Bearer 토큰 추출.
///
/// 스킴은 대소문자를 구분하지 않습니다.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER) && !token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for JwtAuth
where
    JwtConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(JwtAuth(claims.clone()));
        }

        let path = parts.uri.path();
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            debug!(path, "Request rejected: missing Authorization header");
            return Err(AuthError::MissingToken);
        };
        let Some(token) = header.to_str().ok().and_then(bearer_token) else {
            debug!(path, "Request rejected: malformed Authorization header");
            return Err(AuthError::InvalidAuthHeader);
        };

        let config = JwtConfig::from_ref(state);
        let claims = decode_token(token, &config).map_err(|e| {
            debug!(error = %e, "Token verification failed");
            AuthError::from(e)
        })?;

        parts.extensions.insert(claims.clone());
        Ok(JwtAuth(claims))
    }
}

/// 관리자 권한을 요구하는 추출기.
///
/// 토큰 검증 후 계정 문서를 다시 조회하여 관리자 여부를 확인합니다.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub Claims);

impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let JwtAuth(claims) = JwtAuth::from_request_parts(parts, state).await?;
        authorize_admin(state.store.as_ref(), &claims).await?;
        Ok(AdminAuth(claims))
    }
}

/// 관리자 검사 미들웨어.
///
/// `middleware::from_fn_with_state`로 라우트 묶음에 적용합니다.
pub async fn require_admin(AdminAuth(claims): AdminAuth, request: Request, next: Next) -> Response {
    debug!(email = ?claims.email, path = %request.uri().path(), "Admin access granted");
    next.run(request).await
}
