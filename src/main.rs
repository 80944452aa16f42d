use clap::Parser;
use iced::{Application, Settings};
use library_books::client::gui::app::BooksApp;
use library_books::common::config::ClientConfig;

/// Library books desktop client.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Books server host (overrides LIBRARY_HOST)
    #[arg(long)]
    host: Option<String>,
    /// Books server port (overrides LIBRARY_PORT)
    #[arg(long)]
    port: Option<u16>,
    /// How long the deletion banner stays visible (overrides NOTIFICATION_TIMEOUT_MS)
    #[arg(long)]
    notification_timeout_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    let args = Args::parse();
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(ms) = args.notification_timeout_ms {
        config.notification_timeout_ms = ms;
    }

    // Configura logging
    std::env::set_var("RUST_LOG", &config.log_level);
    env_logger::init();
    log::info!("Starting library client against {}", config.address());

    BooksApp::run(Settings::with_flags(config))?;
    Ok(())
}
