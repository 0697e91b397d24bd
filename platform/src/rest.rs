//! REST client for the chat platform's member API.
//!
//! Routes (relative to `api_base`):
//! - `GET    /guilds/{guild}/members/{user}` — member info, `roles` array
//! - `PUT    /guilds/{guild}/members/{user}/roles/{role}` — add role
//! - `PATCH  /guilds/{guild}/members/{user}` — `{"nick": ...}`
//!
//! A 403 maps to [`PlatformError::Forbidden`]; timeouts and connection
//! failures map to [`PlatformError::Transport`].

use crate::{PlatformBinding, PlatformError};
use gauth_types::RequesterId;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Reqwest-backed platform binding.
pub struct RestPlatform {
    http_client: reqwest::Client,
    api_base: String,
    token: String,
    guild_id: u64,
    role_id: u64,
}

#[derive(Debug, Deserialize)]
struct MemberResponse {
    #[serde(default)]
    roles: Vec<String>,
}

impl RestPlatform {
    pub fn new(
        api_base: impl Into<String>,
        token: impl Into<String>,
        guild_id: u64,
        role_id: u64,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http_client,
            api_base: api_base.into(),
            token: token.into(),
            guild_id,
            role_id,
        }
    }

    fn member_url(&self, requester: RequesterId) -> String {
        format!(
            "{}/guilds/{}/members/{}",
            self.api_base.trim_end_matches('/'),
            self.guild_id,
            requester
        )
    }

    fn map_send_error(e: reqwest::Error) -> PlatformError {
        if e.is_timeout() {
            PlatformError::Transport(format!("request timed out: {e}"))
        } else if e.is_connect() {
            PlatformError::Transport(format!("connection failed: {e}"))
        } else {
            PlatformError::Api(e.to_string())
        }
    }

    fn check_status(status: reqwest::StatusCode) -> Result<(), PlatformError> {
        if status.is_success() {
            Ok(())
        } else if status == reqwest::StatusCode::FORBIDDEN {
            Err(PlatformError::Forbidden)
        } else {
            Err(PlatformError::Api(format!("HTTP status {status}")))
        }
    }
}

impl PlatformBinding for RestPlatform {
    async fn has_role(&self, requester: RequesterId) -> Result<bool, PlatformError> {
        let response = self
            .http_client
            .get(self.member_url(requester))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response.status())?;

        let member: MemberResponse = response
            .json()
            .await
            .map_err(|e| PlatformError::Api(format!("bad member response: {e}")))?;

        let role = self.role_id.to_string();
        Ok(member.roles.iter().any(|r| r == &role))
    }

    async fn grant_role(&self, requester: RequesterId) -> Result<(), PlatformError> {
        let url = format!("{}/roles/{}", self.member_url(requester), self.role_id);
        let response = self
            .http_client
            .put(url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response.status())?;
        tracing::info!(%requester, "verified role granted");
        Ok(())
    }

    async fn set_display_name(&self, requester: RequesterId, name: &str) -> Result<(), PlatformError> {
        let response = self
            .http_client
            .patch(self.member_url(requester))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "nick": name }))
            .send()
            .await
            .map_err(Self::map_send_error)?;

        Self::check_status(response.status())
    }
}
