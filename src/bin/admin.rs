//! CLI administration tool for shortlink.
//!
//! Talks to the configured storage backend directly, without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check that the storage backend is reachable
//! cargo run --bin admin -- check
//!
//! # Create a short link
//! cargo run --bin admin -- shorten https://example.com/a/b?c=1
//!
//! # Look up a short code
//! cargo run --bin admin -- resolve Xy3_k9-A
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `shortlink::config`. `REDIS_URL=memory` is
//! accepted but only useful for `check`, since nothing outlives the command.

use shortlink::application::services::LinkService;
use shortlink::config::{self, StorageConfig};
use shortlink::error::AppError;
use shortlink::server::build_store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to the storage backend and ping it
    Check,

    /// Create a short link
    Shorten {
        /// The URL to shorten
        url: String,

        /// Base used to print the full short URL
        #[arg(short, long, env = "PUBLIC_BASE_URL", default_value = "http://localhost:3000")]
        base: String,
    },

    /// Resolve a short code to its original URL
    Resolve {
        /// The short code
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    if config.storage == StorageConfig::Memory && !matches!(cli.command, Commands::Check) {
        println!(
            "{}",
            "Warning: in-memory storage is discarded when this command exits".yellow()
        );
    }

    let store = build_store(&config).await?;
    let service = LinkService::new(store, config.link_ttl_seconds);

    match cli.command {
        Commands::Check => handle_check(&service).await,
        Commands::Shorten { url, base } => handle_shorten(&service, &url, &base).await,
        Commands::Resolve { code } => handle_resolve(&service, &code).await,
    }
}

async fn handle_check(service: &LinkService) -> Result<()> {
    println!("{}", "Checking storage backend...".cyan());

    if service.store_healthy().await {
        println!(
            "{} {} backend is reachable",
            "✓".green().bold(),
            service.store_kind().bold()
        );
        Ok(())
    } else {
        println!(
            "{} {} backend did not answer",
            "✗".red().bold(),
            service.store_kind().bold()
        );
        anyhow::bail!("storage backend health check failed")
    }
}

async fn handle_shorten(service: &LinkService, url: &str, base: &str) -> Result<()> {
    let link = service.create(url).await.map_err(describe)?;

    println!("{}", "✓ Short link created".green().bold());
    println!();
    println!("  {}: {}", "Short URL".bold(), service.short_url(base, &link.code).cyan());
    println!("  {}: {}", "Code".bold(), link.code);
    println!("  {}: {}", "Target".bold(), link.long_url);
    println!(
        "  {}: {}",
        "Expires".bold(),
        link.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    Ok(())
}

async fn handle_resolve(service: &LinkService, code: &str) -> Result<()> {
    match service.resolve(code).await {
        Ok(url) => {
            println!("{} {} → {}", "✓".green().bold(), code.bold(), url.cyan());
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{} {} not found or expired", "✗".yellow().bold(), code.bold());
            Ok(())
        }
        Err(e) => Err(describe(e)),
    }
}

fn describe(e: AppError) -> anyhow::Error {
    anyhow::anyhow!("{} ({})", e, e.code())
}
