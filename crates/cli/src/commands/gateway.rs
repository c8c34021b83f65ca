//! `folio gateway` — Start the HTTP API server.

use folio_config::AppConfig;
use tracing::info;

pub async fn run(port_override: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    if let Some(port) = port_override {
        info!(port, "Gateway port overridden from the command line");
        config.gateway.port = port;
    }

    println!("Folio Gateway");
    println!("   Listening: {}:{}", config.gateway.host, config.gateway.port);
    println!("   Site origin: {}", config.gateway.allowed_origin);

    folio_gateway::start(config).await?;

    Ok(())
}
