//! Home Assistant automation MCP server - main entry point
//!
//! Speaks MCP over stdio; stdout carries protocol frames only.

use ha_automation_mcp::{
    config::{DEFAULT_HA_URL, HA_TIMEOUT_ENV, HA_TOKEN_ENV, HA_URL_ENV},
    framework_integration::serve_stdio,
    logging::{init_logging, LogConfig},
    AutomationBackend, HaConfig, HaHttpClient, Result,
};

use clap::Parser;
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{error, info};

/// Server configuration
#[derive(Parser, Debug)]
#[command(name = "ha-automation-mcp")]
#[command(about = "MCP server for managing Home Assistant automations")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Home Assistant base URL
    #[arg(long, env = HA_URL_ENV, default_value = DEFAULT_HA_URL)]
    ha_url: String,

    /// Long-lived access token
    #[arg(long, env = HA_TOKEN_ENV, hide_env_values = true)]
    ha_token: Option<String>,

    /// Request timeout in seconds (HTTP client default when unset)
    #[arg(long, env = HA_TIMEOUT_ENV)]
    timeout_secs: Option<u64>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Also write logs to this file (rotated daily)
    #[arg(long, env = "HA_MCP_LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn ha_config(&self) -> Result<HaConfig> {
        let mut config = HaConfig::new(&self.ha_url, self.ha_token.clone().unwrap_or_default())?;
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(LogConfig::new(cli.debug, cli.log_file.clone()))?;

    let config = match cli.ha_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return Err(e);
        }
    };

    info!(
        "Starting Home Assistant automation MCP server v{} for {}",
        env!("CARGO_PKG_VERSION"),
        config.url
    );

    let client = HaHttpClient::new(config)?;
    let backend = AutomationBackend::with_client(Arc::new(client));

    serve_stdio(backend).await?;

    info!("Server stopped");
    Ok(())
}
