//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.
//! 인증/권한 에러는 [`crate::auth::AuthError`]가 별도 형식으로 응답합니다.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    Json,
};
use news_core::{Document, DocumentId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::repository::StoreError;
use crate::services::PaymentError;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "INVALID_ID",
///   "message": "잘못된 문서 ID: 42",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "DB_ERROR", "INVALID_INPUT", "PAYMENT_ERROR")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 상태 코드와 에러 본문 생성.
pub fn api_error(
    status: StatusCode,
    code: &str,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiErrorResponse>) {
    (status, Json(ApiErrorResponse::new(code, message)))
}

/// 잘못된 입력 (400).
pub fn bad_request(code: &str, message: impl Into<String>) -> (StatusCode, Json<ApiErrorResponse>) {
    let message = message.into();
    warn!(code, %message, "Rejected request input");
    api_error(StatusCode::BAD_REQUEST, code, message)
}

/// 저장소 에러 변환 (500).
pub fn db_error(err: StoreError) -> (StatusCode, Json<ApiErrorResponse>) {
    error!(error = %err, "Document store operation failed");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "DB_ERROR", err.to_string())
}

/// 결제 처리 에러 변환.
///
/// 금액 오류는 400, 그 외 결제 대행사 실패는 502.
pub fn payment_error(err: PaymentError) -> (StatusCode, Json<ApiErrorResponse>) {
    match err {
        PaymentError::InvalidAmount(_) => bad_request("INVALID_PRICE", err.to_string()),
        _ => {
            error!(error = %err, "Payment processor request failed");
            api_error(StatusCode::BAD_GATEWAY, "PAYMENT_ERROR", err.to_string())
        }
    }
}

/// 경로의 문서 ID 파싱.
pub fn parse_id(raw: &str) -> ApiResult<DocumentId> {
    raw.parse()
        .map_err(|e: news_core::NewsError| bad_request("INVALID_ID", e.to_string()))
}

/// 요청 본문을 JSON 객체로 변환.
///
/// 본문 파싱 실패 또는 객체가 아닌 JSON은 400.
pub fn json_object(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Document> {
    let Json(value) = payload.map_err(|e| bad_request("INVALID_BODY", e.body_text()))?;
    match value {
        Value::Object(document) => Ok(document),
        other => Err(bad_request(
            "INVALID_BODY",
            format!("요청 본문은 JSON 객체여야 합니다: {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_error_response_new() {
        let error = ApiErrorResponse::new("TEST_ERROR", "Test message");
        assert_eq!(error.code, "TEST_ERROR");
        assert_eq!(error.message, "Test message");
        assert!(error.timestamp.is_some());

        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["code"], "TEST_ERROR");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_parse_id() {
        let id = DocumentId::new();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);

        let (status, Json(body)) = parse_id("not-an-id").unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_ID");
    }

    #[test]
    fn test_json_object() {
        let document = json_object(Ok(Json(json!({"title": "t"})))).unwrap();
        assert_eq!(document["title"], "t");

        let (status, Json(body)) = json_object(Ok(Json(json!([1, 2])))).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.message.contains("array"));
    }

    #[test]
    fn test_payment_error_status() {
        let (status, _) = payment_error(PaymentError::InvalidAmount("0".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(body)) = payment_error(PaymentError::MissingClientSecret);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.code, "PAYMENT_ERROR");
    }
}
