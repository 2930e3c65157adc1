use anyhow::Result;
use clap::Parser;
use satellite_bridge::speech::QuietHours;
use satellite_bridge::{
    CommandRecovery, Config, Dispatcher, HomeAssistantClient, Server, SharedSession, Watchdog,
};
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "satellite-bridge")]
#[command(about = "Voice satellite event handler. Plays activity chimes and speaks responses through Home Assistant")]
struct Args {
    /// Config file (YAML)
    #[arg(short, long, default_value = "./config.yml")]
    config: String,

    /// Debug logging
    #[arg(short = 'v', long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.debug { Level::DEBUG } else { Level::INFO })
        .init();

    let cfg = Config::load(&args.config)?;

    info!("Starting up satellite bridge");
    info!(
        "Home Assistant: {} -> {}",
        cfg.homeassistant.host, cfg.homeassistant.target_media_player
    );

    let session = SharedSession::new();

    let notifier = HomeAssistantClient::new(
        &cfg.homeassistant,
        &cfg.tts,
        &cfg.activity_settings,
        &cfg.http,
    )?;
    let dispatcher = Dispatcher::new(
        session.clone(),
        Arc::new(notifier),
        cfg.activity_settings.clone(),
        cfg.tts.volume_level,
        QuietHours::from_config(&cfg.quiet_hours)?,
    );

    let recovery = CommandRecovery::new(&cfg.watchdog.restart_command)?;
    info!("Watchdog recovery command: {}", recovery.command_line());
    let watchdog = Watchdog::from_config(session, Arc::new(recovery), &cfg.watchdog);

    let server = Server::bind(&cfg.bind_address(), dispatcher, watchdog).await?;
    server.run().await
}
