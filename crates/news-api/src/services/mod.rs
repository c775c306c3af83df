//! 외부 서비스 연동.
//!
//! 현재는 결제 대행사(Stripe) 결제 의도 생성만 제공합니다.

pub mod payment;
pub mod stripe;

pub use payment::{amount_to_minor_units, PaymentError, PaymentIntent, PaymentProcessor};
pub use stripe::{StripeClient, StripeConfig};
