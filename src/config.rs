use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Password;

use crate::cli::Command;

/// Globomap API client
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Globomap API URL
    #[arg(short = 'a', long, env = "GMAP_API_URL")]
    pub url: Option<String>,

    /// Globomap API username
    #[arg(short = 'u', long, env = "GMAP_API_USERNAME")]
    pub username: Option<String>,

    /// Globomap API password
    #[arg(short = 'p', long, env = "GMAP_API_PASSWORD")]
    pub password: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "GMAP_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "GMAP_HTTP_TIMEOUT", default_value = "30")]
    pub http_timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api_url: String,
    pub username: String,
    pub password: String,
    pub http_timeout: u64,
    pub log_level: String,
}

impl Config {
    /// Load configuration with priority: CLI > ENV > prompt.
    ///
    /// Username and password each accept a second environment spelling
    /// (`GMAP_USERNAME`, `GMAP_PASSWORD`) as a fallback.
    pub fn load() -> Result<(Self, Command)> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let args = CliArgs::parse();

        let api_url = args
            .url
            .context("API URL is required (use -a or set GMAP_API_URL)")?;

        let username = args
            .username
            .or_else(|| std::env::var("GMAP_USERNAME").ok())
            .context("username is required (use -u or set GMAP_API_USERNAME)")?;

        let password = match args.password.or_else(|| std::env::var("GMAP_PASSWORD").ok()) {
            Some(password) => password,
            None => prompt_password(&username)?,
        };

        let config = Config {
            api_url: normalize_api_url(&api_url),
            username,
            password,
            http_timeout: args.http_timeout,
            log_level: args.log_level,
        };

        Ok((config, args.command))
    }
}

/// Strips trailing slashes so path concatenation yields single separators
fn normalize_api_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

/// Asks for the password on the terminal when neither flag nor
/// environment supplied one.
fn prompt_password(username: &str) -> Result<String> {
    let password = Password::new()
        .with_prompt(format!("Globomap API password for {}", username))
        .interact()
        .context("Failed to read password")?;

    if password.is_empty() {
        anyhow::bail!("password cannot be empty");
    }

    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_api_url_strips_trailing_slash() {
        assert_eq!(
            normalize_api_url("https://api.globomap.example.com/"),
            "https://api.globomap.example.com"
        );
        assert_eq!(
            normalize_api_url("https://api.globomap.example.com//"),
            "https://api.globomap.example.com"
        );
    }

    #[test]
    fn test_normalize_api_url_leaves_clean_url_alone() {
        assert_eq!(
            normalize_api_url("http://localhost:5000"),
            "http://localhost:5000"
        );
    }
}
