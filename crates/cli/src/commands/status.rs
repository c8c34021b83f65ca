//! `folio status` — Show configuration status.

use folio_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let projects = config.project_catalog();

    println!("Folio Status");
    println!("============");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Owner:        {} ({})", config.profile.name, config.profile.title);
    println!("  Reply delay:  {} ms", config.assistant.reply_delay_ms);
    println!("  Submit:       {:?}", config.assistant.submit_policy);
    println!("  Overrides:    {} topic(s)", config.assistant.responses.len());
    println!("  Skills:       {}", config.skills.len());
    println!("  Projects:     {} ({} featured)", projects.len(), projects.featured().len());
    println!("  Gateway:      {}:{}", config.gateway.host, config.gateway.port);

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `folio onboard` first");
    }

    Ok(())
}
