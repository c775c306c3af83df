//! 결제 endpoint.
//!
//! - POST /create-payment-intent - 가격으로 결제 의도 생성 후 client secret 반환
//! - POST /payments - 결제 기록 저장
//!
//! 결제 의도와 결제 기록은 서로 연결하지 않습니다. 의도 ID는 로그로만 남습니다.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use news_core::Collection;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{api_error, bad_request, db_error, json_object, payment_error, ApiResult};
use crate::repository::InsertResult;
use crate::services::amount_to_minor_units;
use crate::state::AppState;

/// 결제 의도 요청.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    /// 주 통화 단위 가격 (예: 9.99)
    pub price: Decimal,
}

/// 결제 의도 응답.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecretResponse {
    pub client_secret: String,
}

/// 결제 의도 생성.
///
/// POST /create-payment-intent
pub async fn create_payment_intent(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ClientSecretResponse>> {
    let Some(processor) = state.payments.as_ref() else {
        warn!("Payment intent requested but no payment processor is configured");
        return Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "PAYMENTS_DISABLED",
            "결제 기능이 설정되지 않았습니다",
        ));
    };

    let body = json_object(payload)?;
    let request: PaymentIntentRequest = serde_json::from_value(Value::Object(body))
        .map_err(|e| bad_request("INVALID_PRICE", e.to_string()))?;

    let amount = amount_to_minor_units(request.price).map_err(payment_error)?;
    let intent = processor
        .create_intent(amount, &state.currency)
        .await
        .map_err(payment_error)?;

    info!(intent_id = %intent.id, amount, currency = %state.currency, "Payment intent issued");
    Ok(Json(ClientSecretResponse {
        client_secret: intent.client_secret,
    }))
}

/// 결제 기록 저장.
///
/// POST /payments
pub async fn record_payment(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<InsertResult>> {
    let payment = json_object(payload)?;
    let result = state
        .store
        .insert_one(Collection::Payments, payment)
        .await
        .map_err(db_error)?;

    info!(id = %result.inserted_id, "Payment recorded");
    Ok(Json(result))
}

/// 결제 라우터 생성.
pub fn payments_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create-payment-intent", post(create_payment_intent))
        .route("/payments", post(record_payment))
}
