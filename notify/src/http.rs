//! HTTP mail-API notifier.
//!
//! Posts `{to, subject, body}` as JSON to a transactional mail endpoint
//! with bearer auth. Timeouts and 5xx responses classify as transient;
//! 4xx address rejections classify as permanent.

use crate::{Notifier, NotifyError};
use serde::Serialize;
use std::time::Duration;

/// Default timeout for a delivery request. The notifier is a network call
/// and must not stall the rest of the system indefinitely.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for a JSON mail API (`POST {endpoint}` with bearer token).
pub struct HttpNotifier {
    http_client: reqwest::Client,
    endpoint: String,
    token: String,
    from_name: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    to: &'a str,
    from_name: &'a str,
    subject: &'a str,
    body: String,
}

impl HttpNotifier {
    /// Create a notifier with default timeout settings.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, from_name: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, token, from_name, DEFAULT_TIMEOUT)
    }

    /// Create a notifier with a custom request timeout.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        from_name: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            endpoint: endpoint.into(),
            token: token.into(),
            from_name: from_name.into(),
        }
    }
}

impl Notifier for HttpNotifier {
    async fn send(&self, to_email: &str, code: &str, full_name: &str) -> Result<(), NotifyError> {
        // Reject obviously bad addresses before touching the network.
        if to_email.is_empty() || !to_email.contains('@') {
            return Err(NotifyError::InvalidAddress(to_email.to_string()));
        }

        let request = SendRequest {
            to: to_email,
            from_name: &self.from_name,
            subject: "Your verification code",
            body: format!(
                "Hello {full_name},\n\n\
                 Your verification code is: {code}\n\n\
                 The code is valid for a few minutes. If you did not request \
                 this code, you can ignore this message.\n"
            ),
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NotifyError::Delivery(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    NotifyError::Delivery(format!("connection failed: {e}"))
                } else {
                    NotifyError::Delivery(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(to = to_email, "verification code delivered");
            return Ok(());
        }

        // The mail API signals an unroutable or rejected address with a
        // 4xx; anything else is the provider's problem, so transient.
        if status.is_client_error() {
            tracing::warn!(to = to_email, %status, "mail API rejected address");
            Err(NotifyError::InvalidAddress(to_email.to_string()))
        } else {
            tracing::warn!(to = to_email, %status, "mail API delivery failure");
            Err(NotifyError::Delivery(format!("HTTP status {status}")))
        }
    }
}
