//! CLI administration tool for snaplink.
//!
//! Talks to the database directly, so it works while the HTTP server is down.
//!
//! # Usage
//!
//! ```bash
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply migrations
//! cargo run --bin admin -- db migrate
//!
//! # Create a short link (prompts for the domain when omitted)
//! cargo run --bin admin -- link create https://example.com --domain s.example.com
//!
//! # Inspect a link without counting a click
//! cargo run --bin admin -- link show aB3xY9
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; `DATABASE_URL` defaults to `sqlite://./urlshortener.db`.

use snaplink::application::services::{LinkService, StatsService};
use snaplink::config::{Config, load_from_env};
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::persistence::{
    self, SqliteLinkRepository, SqliteStatsRepository,
};
use snaplink::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::SqlitePool;
use std::sync::Arc;

/// CLI tool for managing snaplink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },
}

/// Database subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection and print totals
    Check,
    /// Apply pending migrations
    Migrate,
    /// Show database info
    Info,
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Allocate a short code for a URL
    Create {
        /// URL to shorten (http:// or https://)
        url: String,

        /// Domain the short link is served under
        #[arg(short, long)]
        domain: Option<String>,
    },
    /// Show a link by code without counting a click
    Show {
        /// Short code
        code: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env()?;

    let pool = persistence::connect(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Link { action } => handle_link_action(action, &pool, &config).await?,
    }

    pool.close().await;

    Ok(())
}

/// Prints the aggregate statistics snapshot.
async fn handle_stats(pool: &SqlitePool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let service = StatsService::new(Arc::new(SqliteStatsRepository::new(Arc::new(
        pool.clone(),
    ))));
    let stats = service.snapshot().await?;

    println!(
        "  Links:  {}",
        stats.total_links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        stats.total_clicks.to_string().bright_green().bold()
    );
    println!();

    if stats.links_per_domain.is_empty() {
        println!("{}", "  No links yet".yellow());
        println!();
        return Ok(());
    }

    println!(
        "  {:<40} {:>8} {:>10}",
        "DOMAIN".bright_white().bold(),
        "LINKS".bright_white().bold(),
        "CLICKS".bright_white().bold()
    );
    println!("  {}", "─".repeat(60).bright_black());
    for (domain, links) in &stats.links_per_domain {
        let clicks = stats.clicks_per_domain.get(domain).copied().unwrap_or(0);
        println!("  {:<40} {:>8} {:>10}", domain.cyan(), links, clicks);
    }
    println!();

    println!("{}", "  Top links".bright_white().bold());
    for link in &stats.top_links {
        println!(
            "  {}  {:>8}  {}",
            link.code.bright_yellow(),
            link.clicks,
            link.original_url.bright_black()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let (links, clicks): (i64, i64) =
                sqlx::query_as("SELECT COUNT(*), COALESCE(SUM(clicks), 0) FROM links")
                    .fetch_one(pool)
                    .await
                    .context("Database check failed (run `admin db migrate` first?)")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  Links: {}, clicks: {}", links, clicks);
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            persistence::migrate(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;
            let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
                .fetch_one(pool)
                .await?;

            println!("  SQLite:       {}", version.bright_white());
            println!("  Journal mode: {}", journal_mode.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, pool: &SqlitePool, config: &Config) -> Result<()> {
    let repo = Arc::new(SqliteLinkRepository::new(Arc::new(pool.clone())));

    match action {
        LinkAction::Create { url, domain } => create_link(repo, url, domain, config).await,
        LinkAction::Show { code } => show_link(repo, &code).await,
    }
}

/// Allocates a short link, prompting for the domain if not given.
async fn create_link(
    repo: Arc<SqliteLinkRepository>,
    url: String,
    domain: Option<String>,
    config: &Config,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let domain = match domain {
        Some(d) => d,
        None => Input::new()
            .with_prompt("Domain")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.trim().is_empty() || input.len() > 253 {
                    Err("Domain must be 1-253 characters")
                } else {
                    Ok(())
                }
            })
            .interact_text()?,
    };

    let service = LinkService::new(
        repo,
        RandomCodeGenerator::new(),
        config.allocation_max_attempts,
    );

    let link = service.allocate(&url, domain.trim()).await?;

    println!("{}", "✅ Link created".green().bold());
    println!();
    println!("  Code:      {}", link.code.bright_yellow().bold());
    println!("  Short URL: {}", link.short_url().cyan());
    println!("  Target:    {}", link.original_url);
    println!();

    Ok(())
}

/// Prints a link without touching its click counter.
async fn show_link(repo: Arc<SqliteLinkRepository>, code: &str) -> Result<()> {
    let Some(link) = repo.find_by_code(code).await? else {
        println!("{}", format!("❌ No link with code '{}'", code).red());
        return Ok(());
    };

    println!("  Code:      {}", link.code.bright_yellow().bold());
    println!("  Short URL: {}", link.short_url().cyan());
    println!("  Target:    {}", link.original_url);
    println!("  Domain:    {}", link.domain);
    println!("  Clicks:    {}", link.clicks.to_string().bright_green());
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    Ok(())
}
