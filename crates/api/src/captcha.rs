//! CAPTCHA verification gate.
//!
//! Citizen survey submissions must pass an external CAPTCHA check BEFORE
//! any call into the core; the core itself never re-checks. Verification
//! can be switched off in configuration for local development.

use lawhear_common::config::CaptchaConfig;
use lawhear_common::{AppError, AppResult};
use serde::Deserialize;

/// Verifies client CAPTCHA tokens against the configured endpoint.
#[derive(Clone)]
pub struct CaptchaVerifier {
    config: CaptchaConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    success: bool,
}

impl CaptchaVerifier {
    /// Create a new verifier.
    #[must_use]
    pub fn new(config: CaptchaConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Whether verification is enforced.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Verify a client token. Succeeds immediately when disabled.
    pub async fn verify(&self, token: &str) -> AppResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        if token.is_empty() {
            return Err(AppError::CaptchaFailed);
        }

        let verify_url = self
            .config
            .verify_url
            .as_deref()
            .ok_or_else(|| AppError::Config("captcha.verify_url is not set".to_string()))?;
        let secret = self.config.secret.as_deref().unwrap_or_default();

        let response = self
            .client
            .post(verify_url)
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("CAPTCHA verifier: {e}")))?;

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalService(format!("CAPTCHA verifier: {e}")))?;

        if body.success {
            Ok(())
        } else {
            Err(AppError::CaptchaFailed)
        }
    }
}
