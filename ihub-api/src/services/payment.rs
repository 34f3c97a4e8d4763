//! Payment Gateway Service
//!
//! Thin client for the Razorpay-compatible order API. Without configured
//! credentials it runs in mock mode: orders get a synthetic id and webhook
//! signatures are accepted, which keeps local development unblocked.

use hmac::{Hmac, Mac};
use ihub_common::config::Settings;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com/v1";

/// Payment service errors
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Gateway returned a non-success status or malformed body
    #[error("Payment gateway error: {0}")]
    Gateway(String),

    /// Transport-level failure talking to the gateway
    #[error("Payment gateway unreachable: {0}")]
    Http(#[from] reqwest::Error),
}

/// An order as returned by the gateway (or mocked locally)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub id: String,
    /// Amount in minor currency units (e.g. paise)
    pub amount: i64,
    pub currency: String,
}

/// Client for the payment gateway's order API
#[derive(Debug, Clone)]
pub struct PaymentService {
    client: reqwest::Client,
    base_url: String,
    key_id: Option<String>,
    key_secret: Option<String>,
}

impl PaymentService {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            key_id: settings.payment_key_id.clone(),
            key_secret: settings.payment_key_secret.clone(),
        }
    }

    /// True when gateway credentials are configured
    pub fn is_configured(&self) -> bool {
        self.key_id.is_some() && self.key_secret.is_some()
    }

    /// Create an order for `amount` in the main currency unit.
    ///
    /// The gateway expects minor units (500.00 INR -> 50000 paise). `notes`
    /// travels with the order and is where callers stash the campaign id.
    pub async fn create_order(
        &self,
        amount: f64,
        currency: &str,
        notes: serde_json::Value,
    ) -> Result<PaymentOrder, PaymentError> {
        let amount_minor = (amount * 100.0).round() as i64;

        let (key_id, key_secret) = match (&self.key_id, &self.key_secret) {
            (Some(id), Some(secret)) => (id, secret),
            _ => {
                // Mock mode: no gateway round-trip
                return Ok(PaymentOrder {
                    id: "order_mock_123".to_string(),
                    amount: amount_minor,
                    currency: currency.to_string(),
                });
            }
        };

        let body = json!({
            "amount": amount_minor,
            "currency": currency,
            "notes": notes,
            "payment_capture": 1,
        });

        let response = self
            .client
            .post(format!("{}/orders", self.base_url))
            .basic_auth(key_id, Some(key_secret))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PaymentError::Gateway(format!("{}: {}", status, text)));
        }

        let order = response.json::<PaymentOrder>().await?;
        Ok(order)
    }

    /// Verify that a webhook body was signed by the gateway.
    ///
    /// The signature is the lowercase hex HMAC-SHA256 of the raw body under
    /// the key secret. Unconfigured deployments accept everything (dev mode).
    pub fn verify_webhook_signature(&self, body: &[u8], signature: &str) -> bool {
        let secret = match &self.key_secret {
            Some(secret) => secret,
            None => return true,
        };

        let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
            Ok(mac) => mac,
            Err(_) => return false,
        };
        mac.update(body);
        let expected = format!("{:x}", mac.finalize().into_bytes());

        expected == signature.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured_settings() -> Settings {
        Settings {
            payment_key_id: Some("rzp_test_key".to_string()),
            payment_key_secret: Some("rzp_test_secret".to_string()),
            ..Settings::default()
        }
    }

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac key");
        mac.update(body);
        format!("{:x}", mac.finalize().into_bytes())
    }

    #[tokio::test]
    async fn test_mock_order_when_unconfigured() {
        let service = PaymentService::new(&Settings::default());
        assert!(!service.is_configured());

        let order = service
            .create_order(500.0, "INR", json!({}))
            .await
            .expect("mock order");
        assert_eq!(order.id, "order_mock_123");
        assert_eq!(order.amount, 50_000);
        assert_eq!(order.currency, "INR");
    }

    #[tokio::test]
    async fn test_minor_unit_conversion_rounds() {
        let service = PaymentService::new(&Settings::default());
        let order = service
            .create_order(19.995, "INR", json!({}))
            .await
            .expect("mock order");
        assert_eq!(order.amount, 2000);
    }

    #[test]
    fn test_webhook_accepts_valid_signature() {
        let service = PaymentService::new(&configured_settings());
        let body = br#"{"event":"payment.captured"}"#;
        let signature = sign("rzp_test_secret", body);
        assert!(service.verify_webhook_signature(body, &signature));
    }

    #[test]
    fn test_webhook_rejects_bad_signature() {
        let service = PaymentService::new(&configured_settings());
        let body = br#"{"event":"payment.captured"}"#;
        assert!(!service.verify_webhook_signature(body, "deadbeef"));
    }

    #[test]
    fn test_webhook_rejects_tampered_body() {
        let service = PaymentService::new(&configured_settings());
        let signature = sign("rzp_test_secret", br#"{"amount":100}"#);
        assert!(!service.verify_webhook_signature(br#"{"amount":999}"#, &signature));
    }

    #[test]
    fn test_webhook_permissive_when_unconfigured() {
        let service = PaymentService::new(&Settings::default());
        assert!(service.verify_webhook_signature(b"anything", "whatever"));
    }
}
