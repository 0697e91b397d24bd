//! Daemon configuration.
//!
//! A TOML file supplies the base; CLI flags and environment variables
//! override individual fields. Secrets (API tokens) normally arrive via
//! the environment rather than the file.

use gauth_types::VerifyParams;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GauthConfig {
    /// Port the HTTP gateway listens on.
    pub listen_port: u16,

    /// Path to the member roster (one JSON record per line).
    pub roster_path: PathBuf,

    /// Directory the audit log files live in.
    pub audit_dir: PathBuf,

    /// How long an issued code stays valid, in seconds.
    pub otp_ttl_secs: u64,

    /// Wrong submissions allowed before a session locks out.
    pub max_attempts: u32,

    /// Log level: "trace", "debug", "info", "warn", "error".
    pub log_level: String,

    pub notifier: NotifierConfig,
    pub platform: PlatformConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// Mail API send endpoint.
    pub endpoint: String,
    /// Bearer token for the mail API.
    pub token: String,
    /// Sender name shown in delivered mail.
    pub from_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Base URL of the platform REST API.
    pub api_base: String,
    /// Bot token for the platform API.
    pub token: String,
    /// Guild (community) the verified role lives in.
    pub guild_id: u64,
    /// Role granted on successful verification.
    pub role_id: u64,
}

impl Default for GauthConfig {
    fn default() -> Self {
        Self {
            listen_port: 8080,
            roster_path: PathBuf::from("./roster.jsonl"),
            audit_dir: PathBuf::from("./audit"),
            otp_ttl_secs: 300,
            max_attempts: 5,
            log_level: "info".to_string(),
            notifier: NotifierConfig::default(),
            platform: PlatformConfig::default(),
        }
    }
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.mailprovider.example/v1/send".to_string(),
            token: String::new(),
            from_name: "Member Verification".to_string(),
        }
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            api_base: "https://discord.com/api/v10".to_string(),
            token: String::new(),
            guild_id: 0,
            role_id: 0,
        }
    }
}

impl GauthConfig {
    /// Verification knobs, clamped to their allowed ranges.
    pub fn verify_params(&self) -> VerifyParams {
        VerifyParams::clamped(self.otp_ttl_secs, self.max_attempts)
    }
}
