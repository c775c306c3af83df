//! Stripe 결제 의도 클라이언트.
//!
//! `POST {api_base}/v1/payment_intents`를 form 형식으로 호출합니다.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{error, info};

use super::payment::{PaymentError, PaymentIntent, PaymentProcessor, PaymentResult};

/// 기본 Stripe API 주소.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Stripe 클라이언트 설정.
#[derive(Debug)]
pub struct StripeConfig {
    /// Stripe secret key
    pub secret_key: SecretString,
    /// API 기본 주소 (테스트 시 mock 서버로 교체)
    pub api_base: String,
}

impl StripeConfig {
    pub fn new(secret_key: SecretString) -> Self {
        Self {
            secret_key,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct IntentBody {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Stripe 결제 대행사.
pub struct StripeClient {
    config: StripeConfig,
    client: reqwest::Client,
}

impl StripeClient {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.config.api_base)
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> PaymentResult<PaymentIntent> {
        let amount = amount_minor.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(self.config.secret_key.expose_secret())
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|e| e.error.message)
                .unwrap_or(body);
            error!(status = status.as_u16(), %message, "Stripe rejected payment intent");
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: IntentBody = response.json().await?;
        let client_secret = body.client_secret.ok_or(PaymentError::MissingClientSecret)?;
        info!(intent_id = %body.id, amount_minor, currency, "Payment intent created");

        Ok(PaymentIntent {
            id: body.id,
            client_secret,
        })
    }

    fn name(&self) -> &str {
        "stripe"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> StripeClient {
        let config = StripeConfig::new(SecretString::new("sk_test_123".into()))
            .with_api_base(server.url());
        StripeClient::new(config)
    }

    #[tokio::test]
    async fn test_create_intent() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/payment_intents")
            .match_header("authorization", "Bearer sk_test_123")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("amount".into(), "999".into()),
                Matcher::UrlEncoded("currency".into(), "usd".into()),
                Matcher::UrlEncoded("payment_method_types[]".into(), "card".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"pi_1","client_secret":"pi_1_secret_abc","amount":999}"#)
            .create_async()
            .await;

        let intent = client_for(&server).create_intent(999, "usd").await.unwrap();

        assert_eq!(intent.id, "pi_1");
        assert_eq!(intent.client_secret, "pi_1_secret_abc");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_intent_rejected() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/payment_intents")
            .with_status(402)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"Amount must be at least $0.50 usd"}}"#)
            .create_async()
            .await;

        let result = client_for(&server).create_intent(1, "usd").await;

        match result {
            Err(PaymentError::Rejected { status, message }) => {
                assert_eq!(status, 402);
                assert!(message.contains("at least"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_client_secret() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/payment_intents")
            .with_status(200)
            .with_body(r#"{"id":"pi_2"}"#)
            .create_async()
            .await;

        let result = client_for(&server).create_intent(500, "usd").await;
        assert!(matches!(result, Err(PaymentError::MissingClientSecret)));
    }
}
