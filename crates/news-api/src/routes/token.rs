//! 토큰 발급 endpoint.
//!
//! 호출자가 보낸 JSON 객체를 그대로 서명하여 1시간(기본) 유효한 토큰을 발급합니다.
//! 발급 자체는 인증 없이 열려 있습니다.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde_json::Value;
use tracing::{debug, error};

use crate::auth::{issue_token, JwtError, TokenResponse};
use crate::error::{api_error, bad_request, json_object, ApiResult};
use crate::state::AppState;

/// 토큰 발급.
///
/// POST /jwt
pub async fn issue(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<TokenResponse>> {
    let payload = json_object(payload)?;

    let token = issue_token(payload, &state.jwt).map_err(|e| match e {
        JwtError::InvalidPayload(message) => bad_request("INVALID_PAYLOAD", message),
        other => {
            error!(error = %other, "Failed to sign token");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_ERROR", other.to_string())
        }
    })?;

    debug!("Issued access token");
    Ok(Json(TokenResponse { token }))
}

/// 토큰 라우터 생성.
pub fn token_router() -> Router<Arc<AppState>> {
    Router::new().route("/jwt", post(issue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::decode_token;
    use crate::routes::test_support::{app, send};
    use crate::state::create_test_state;
    use axum::http::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_issue_token() {
        let state = Arc::new(create_test_state());
        let (status, body) = send(
            app(&state),
            Method::POST,
            "/jwt",
            None,
            Some(json!({"email": "a@b.com", "name": "A"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let claims = decode_token(body["token"].as_str().unwrap(), &state.jwt).unwrap();
        assert_eq!(claims.email.as_deref(), Some("a@b.com"));
        assert_eq!(claims.extra["name"], "A");
    }

    #[tokio::test]
    async fn test_issue_rejects_non_object() {
        let state = Arc::new(create_test_state());
        let (status, body) =
            send(app(&state), Method::POST, "/jwt", None, Some(json!("a@b.com"))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_issue_rejects_non_string_email() {
        let state = Arc::new(create_test_state());
        let (status, body) =
            send(app(&state), Method::POST, "/jwt", None, Some(json!({"email": 1}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_PAYLOAD");
    }
}
