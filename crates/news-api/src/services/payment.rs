//! 결제 의도(payment intent) 타입 및 trait 정의.

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 생성된 결제 의도.
///
/// `client_secret`은 클라이언트가 결제를 완료할 때 사용하는 불투명 값입니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

/// 결제 에러.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("잘못된 결제 금액: {0}")]
    InvalidAmount(String),

    #[error("결제 대행사 요청 거부 (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("결제 대행사 응답에 client_secret이 없습니다")]
    MissingClientSecret,

    #[error("네트워크 에러: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// 결제 처리 Result 타입.
pub type PaymentResult<T> = Result<T, PaymentError>;

/// 결제 대행사 trait.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// 최소 통화 단위 금액으로 결제 의도를 생성합니다.
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> PaymentResult<PaymentIntent>;

    /// 대행사 이름.
    fn name(&self) -> &str;
}

/// 가격(주 통화 단위)을 최소 통화 단위로 변환.
///
/// 100을 곱한 뒤 0 방향으로 버림합니다. 결과가 1 미만이면 에러.
///
/// # Example
///
/// ```
/// use news_api::services::amount_to_minor_units;
/// use rust_decimal::Decimal;
///
/// assert_eq!(amount_to_minor_units(Decimal::new(999, 2)).unwrap(), 999);
/// ```
pub fn amount_to_minor_units(price: Decimal) -> PaymentResult<i64> {
    if price <= Decimal::ZERO {
        return Err(PaymentError::InvalidAmount(price.to_string()));
    }

    let minor = price
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|amount| amount.trunc())
        .and_then(|amount| amount.to_i64())
        .ok_or_else(|| PaymentError::InvalidAmount(price.to_string()))?;

    if minor < 1 {
        return Err(PaymentError::InvalidAmount(price.to_string()));
    }
    Ok(minor)
}
