//! JWT 토큰 처리.
//!
//! 호출자가 보낸 신원 정보(payload)를 서명하여 만료 시간이 있는 토큰을 발급하고,
//! 요청마다 서명과 만료를 검증합니다.
//!
//! 발급 엔드포인트는 인증 없이 열려 있으므로, 서명은 "서버가 이 주장에 대해
//! 토큰을 발급했다"는 것만 보증합니다. 주장 자체를 검증하지는 않습니다.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use news_core::{Document, EMAIL_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 기본 토큰 유효 시간 (1시간).
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// JWT 페이로드.
///
/// 호출자가 보낸 필드는 `extra`에 그대로 보존됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// 신원 식별자 (이메일)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    pub exp: i64,
    /// 그 외 호출자가 보낸 필드
    #[serde(flatten)]
    pub extra: Document,
}

impl Claims {
    /// 호출자 payload로 Claims 생성.
    ///
    /// payload의 `iat`/`exp`는 발급 시점 기준 값으로 덮어씁니다.
    ///
    /// # Errors
    /// `email`이 문자열이 아니면 [`JwtError::InvalidPayload`].
    pub fn from_payload(mut payload: Document, ttl_secs: i64) -> Result<Self, JwtError> {
        payload.remove("iat");
        payload.remove("exp");

        let email = match payload.remove(EMAIL_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(email)) => Some(email),
            Some(_) => {
                return Err(JwtError::InvalidPayload(
                    "email은 문자열이어야 합니다".to_string(),
                ))
            }
        };

        let now = Utc::now().timestamp();
        Ok(Self {
            email,
            iat: now,
            exp: now + ttl_secs,
            extra: payload,
        })
    }
}

/// 발급 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// JWT 에러.
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("토큰 인코딩 실패: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("토큰이 만료되었습니다")]
    TokenExpired,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("잘못된 payload: {0}")]
    InvalidPayload(String),
}

/// JWT 서명/검증 키와 유효 시간.
///
/// 애플리케이션 상태에 한 번 만들어 두고 모든 요청에서 공유합니다.
#[derive(Clone)]
pub struct JwtConfig {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl JwtConfig {
    /// HS256 비밀 키로 설정 생성.
    pub fn from_secret(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        // payload는 호출자가 정하므로 aud 등은 검사하지 않음
        validation.validate_aud = false;
        validation
    }
}

/// Claims를 서명하여 토큰 생성.
pub fn create_token(claims: &Claims, config: &JwtConfig) -> Result<String, JwtError> {
    encode(&Header::new(Algorithm::HS256), claims, &config.encoding).map_err(JwtError::from)
}

/// 호출자 payload로 토큰 발급.
pub fn issue_token(payload: Document, config: &JwtConfig) -> Result<String, JwtError> {
    let claims = Claims::from_payload(payload, config.ttl_secs)?;
    create_token(&claims, config)
}

/// 토큰 디코딩 및 서명/만료 검증.
pub fn decode_token(token: &str, config: &JwtConfig) -> Result<Claims, JwtError> {
    decode::<Claims>(token, &config.decoding, &JwtConfig::validation())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::InvalidToken,
        })
}
