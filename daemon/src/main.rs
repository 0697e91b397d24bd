//! gauth daemon entry point.
//!
//! Loads configuration, wires the verification engine to its live
//! collaborators, and serves the HTTP gateway until shutdown.

mod config;

use clap::Parser;
use config::GauthConfig;
use gauth_audit::AuditLog;
use gauth_directory::FileDirectory;
use gauth_engine::VerificationEngine;
use gauth_gateway::handlers::AppState;
use gauth_gateway::GatewayServer;
use gauth_notify::HttpNotifier;
use gauth_otp::{AttemptTracker, OtpStore, RandomCodes};
use gauth_platform::RestPlatform;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "gauth-daemon", about = "Member verification service daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Port for the HTTP gateway.
    #[arg(long, env = "GAUTH_PORT")]
    port: Option<u16>,

    /// Path to the member roster file.
    #[arg(long, env = "GAUTH_ROSTER")]
    roster: Option<PathBuf>,

    /// Directory for audit log files.
    #[arg(long, env = "GAUTH_AUDIT_DIR")]
    audit_dir: Option<PathBuf>,

    /// Seconds an issued code stays valid.
    #[arg(long, env = "GAUTH_OTP_TTL_SECS")]
    otp_ttl_secs: Option<u64>,

    /// Wrong submissions allowed before lockout.
    #[arg(long, env = "GAUTH_MAX_ATTEMPTS")]
    max_attempts: Option<u32>,

    /// Bearer token for the mail API.
    #[arg(long, env = "GAUTH_MAIL_TOKEN")]
    mail_token: Option<String>,

    /// Bot token for the platform API.
    #[arg(long, env = "GAUTH_PLATFORM_TOKEN")]
    platform_token: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "GAUTH_LOG_LEVEL")]
    log_level: String,
}

fn load_config(cli: &Cli) -> GauthConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str::<GauthConfig>(&contents) {
                Ok(cfg) => {
                    tracing::info!("Loaded config from {}", config_path.display());
                    cfg
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config file: {e}, using defaults");
                    GauthConfig::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Failed to read config file {}: {e}, using defaults",
                    config_path.display()
                );
                GauthConfig::default()
            }
        }
    } else {
        GauthConfig::default()
    };

    if let Some(port) = cli.port {
        config.listen_port = port;
    }
    if let Some(ref roster) = cli.roster {
        config.roster_path = roster.clone();
    }
    if let Some(ref audit_dir) = cli.audit_dir {
        config.audit_dir = audit_dir.clone();
    }
    if let Some(ttl) = cli.otp_ttl_secs {
        config.otp_ttl_secs = ttl;
    }
    if let Some(attempts) = cli.max_attempts {
        config.max_attempts = attempts;
    }
    if let Some(ref token) = cli.mail_token {
        config.notifier.token = token.clone();
    }
    if let Some(ref token) = cli.platform_token {
        config.platform.token = token.clone();
    }
    config.log_level = cli.log_level.clone();

    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gauth_utils::init_tracing();

    let cli = Cli::parse();
    let config = load_config(&cli);
    let params = config.verify_params();

    let directory = FileDirectory::load(&config.roster_path)?;
    tracing::info!(
        "Loaded {} roster records from {}",
        directory.len(),
        config.roster_path.display()
    );

    let notifier = HttpNotifier::new(
        &config.notifier.endpoint,
        &config.notifier.token,
        &config.notifier.from_name,
    );
    let platform = RestPlatform::new(
        &config.platform.api_base,
        &config.platform.token,
        config.platform.guild_id,
        config.platform.role_id,
    );
    let audit = Arc::new(AuditLog::open(&config.audit_dir)?);

    let engine = VerificationEngine::new(
        directory,
        notifier,
        platform,
        Arc::new(OtpStore::new()),
        Arc::new(AttemptTracker::new()),
        audit,
        Arc::new(RandomCodes::new()),
        params,
    );

    tracing::info!(
        "Starting verification gateway on port {} (ttl {}s, {} attempts)",
        config.listen_port,
        params.otp_ttl_secs,
        params.max_attempts
    );

    let state = Arc::new(AppState { engine });
    let server = GatewayServer::new(config.listen_port, state);
    server.serve().await?;

    tracing::info!("gauth daemon exited cleanly");
    Ok(())
}
