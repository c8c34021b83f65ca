//! `folio chat` — Interactive or single-message chat mode.

use std::io::Write;
use std::sync::Arc;

use folio_agent::TurnController;
use folio_channels::{CliChannel, WidgetShell};
use folio_config::AppConfig;
use folio_core::channel::Channel;
use folio_core::event::EventBus;
use tracing::debug;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let catalog = Arc::new(config.response_catalog());
    let event_bus = Arc::new(EventBus::default());
    let controller = Arc::new(TurnController::from_config(&config, catalog, event_bus));
    let channel = CliChannel::new();
    debug!(
        delay_ms = config.assistant.reply_delay_ms,
        policy = ?config.assistant.submit_policy,
        "Chat session ready"
    );

    if let Some(msg) = message {
        // Single message mode
        channel.send_typing("cli_session", true).await?;
        let outcome = controller.submit(&msg).await;
        channel.send_typing("cli_session", false).await?;

        match outcome {
            Some(outcome) => println!("{}", outcome.reply.content),
            None => return Err("Message is empty".into()),
        }
        return Ok(());
    }

    // Interactive mode
    let mut shell = WidgetShell::new(controller);
    shell.open();

    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║          Folio Assistant — Chat Mode          ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Owner:     {}", config.profile.name);
    println!("  Delay:     {} ms", config.assistant.reply_delay_ms);
    println!();
    println!("  Ask about skills, experience, projects, contact or resume.");
    println!("  Type 'exit' or Ctrl+C to quit.");
    println!();
    for line in shell.render().await.to_lines() {
        println!("  {line}");
    }
    println!();

    let mut rx = channel.start().await.map_err(|e| format!("Channel error: {e}"))?;

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(result) = rx.recv().await {
        match result {
            Ok(chan_msg) => {
                shell.set_input(chan_msg.content);
                if let Some(handle) = shell.submit() {
                    channel.send_typing(&chan_msg.chat_id, true).await?;
                    let outcome = handle.await?;
                    channel.send_typing(&chan_msg.chat_id, false).await?;

                    if let Some(outcome) = outcome {
                        println!();
                        channel.send(&chan_msg.chat_id, &outcome.reply.content).await?;
                    }
                }

                print!("  You > ");
                std::io::stdout().flush()?;
            }
            Err(e) => {
                eprintln!("  [Channel Error] {e}");
                break;
            }
        }
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}
