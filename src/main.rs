use anyhow::Result;

use globomap_client::cli;
use globomap_client::client::GmapClient;
use globomap_client::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let (config, command) = Config::load()?;

    // Logs go to stderr so stdout stays valid JSON for piping.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(api_url = %config.api_url, "client configured");

    let client = GmapClient::new(&config)?;
    cli::run(&client, command).await;

    Ok(())
}
