//! Outbound notification webhook
//!
//! Alert notifications are forwarded to an external endpoint (ops chat
//! bridge, pager relay) as signed JSON. The receiver verifies the
//! HMAC-SHA256 signature carried in the request header.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Serialize;
use sha2::Sha256;

use crate::config::WebhookConfig;
use crate::error::{AppError, AppResult};

/// Header carrying the payload signature
pub const SIGNATURE_HEADER: &str = "x-rop-signature";

/// Client pushing notifications to the configured webhook
#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    endpoint: String,
    secret: String,
}

/// Sign a payload with the shared secret
pub fn sign_payload(secret: &str, body: &[u8]) -> Result<String, &'static str> {
    type HmacSha256 = Hmac<Sha256>;
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| "Failed to create HMAC")?;
    mac.update(body);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

impl WebhookNotifier {
    /// Build a notifier from config; returns None when the webhook is
    /// disabled or not set up
    pub fn from_config(config: &WebhookConfig) -> Option<Self> {
        if !config.enabled || config.endpoint.is_empty() || config.secret.is_empty() {
            return None;
        }
        Some(Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            secret: config.secret.clone(),
        })
    }

    /// POST one notification to the webhook, signed
    pub async fn push<T: Serialize>(&self, payload: &T) -> AppResult<()> {
        let body = serde_json::to_vec(payload)
            .map_err(|e| AppError::Internal(format!("Webhook payload serialization: {}", e)))?;
        let signature = sign_payload(&self.secret, &body)
            .map_err(|msg| AppError::WebhookError(msg.to_string()))?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::WebhookError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::WebhookError(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        tracing::debug!(endpoint = %self.endpoint, "Webhook notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_is_deterministic() {
        let a = sign_payload("secret", b"{\"title\":\"Low tank stock\"}").unwrap();
        let b = sign_payload("secret", b"{\"title\":\"Low tank stock\"}").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_changes_with_secret_and_body() {
        let base = sign_payload("secret", b"payload").unwrap();
        assert_ne!(sign_payload("other", b"payload").unwrap(), base);
        assert_ne!(sign_payload("secret", b"payload2").unwrap(), base);
    }

    #[test]
    fn test_disabled_webhook_builds_no_notifier() {
        let config = WebhookConfig {
            enabled: false,
            endpoint: "https://hooks.example.com/ops".to_string(),
            secret: "secret".to_string(),
        };
        assert!(WebhookNotifier::from_config(&config).is_none());

        let config = WebhookConfig {
            enabled: true,
            endpoint: String::new(),
            secret: "secret".to_string(),
        };
        assert!(WebhookNotifier::from_config(&config).is_none());
    }
}
