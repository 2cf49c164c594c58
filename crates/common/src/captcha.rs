use std::time::Duration;

use tracing::warn;

use crate::CoreError;

/// Default reCAPTCHA verification endpoint.
pub const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Client for the external CAPTCHA verification service.
///
/// Without a configured secret, verification is a permissive no-op success
/// (a deliberate non-production fallback). With a secret, any transport or
/// parse failure counts as a failed verification, never as a request error.
#[derive(Clone)]
pub struct CaptchaVerifier {
    secret: Option<String>,
    endpoint: String,
    client: reqwest::Client,
}

impl CaptchaVerifier {
    pub fn new(secret: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { secret, endpoint: SITEVERIFY_URL.to_string(), client })
    }

    /// Point at a different verification endpoint (tests, self-hosted).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Verify a submitted token. Fail-closed on any upstream problem.
    pub async fn verify(&self, token: &str) -> bool {
        let secret = match &self.secret {
            Some(s) => s,
            None => return true,
        };
        match self.siteverify(secret, token).await {
            Ok(success) => success,
            Err(e) => {
                warn!(error = %e, "captcha verification degraded to failure");
                false
            }
        }
    }

    async fn siteverify(&self, secret: &str, token: &str) -> Result<bool, CoreError> {
        let params = [("secret", secret), ("response", token)];
        let resp = self
            .client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| CoreError::Network(e.to_string()))?;
        let body = resp
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CoreError::Parse(e.to_string()))?;
        Ok(body.get("success").and_then(|s| s.as_bool()).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_secret_is_permissive() {
        let v = CaptchaVerifier::new(None, Duration::from_secs(1)).unwrap();
        assert!(v.verify("anything").await);
    }

    #[tokio::test]
    async fn unreachable_endpoint_fails_closed() {
        let v = CaptchaVerifier::new(Some("secret".into()), Duration::from_millis(300))
            .unwrap()
            .with_endpoint("http://127.0.0.1:9/siteverify");
        assert!(!v.verify("token").await);
    }
}
