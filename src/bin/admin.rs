//! CLI administration tool for traffic-splitter.
//!
//! Manages campaigns and their links directly against the configured store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a campaign
//! cargo run --bin admin -- campaign create --name "Spring promo" --country MA
//!
//! # List all campaigns
//! cargo run --bin admin -- campaign list
//!
//! # Show one campaign with its weight split
//! cargo run --bin admin -- campaign show abc123
//!
//! # Add a weighted destination
//! cargo run --bin admin -- link add abc123 https://www.bing.com 20
//!
//! # Delete a campaign
//! cargo run --bin admin -- campaign delete abc123
//!
//! # Check store connectivity
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `STORE_BACKEND` (`file` or `postgres`), `STORE_FILE`,
//! `DATABASE_URL`. The in-memory backend is rejected since nothing would persist.

use traffic_splitter::application::services::CampaignService;
use traffic_splitter::config::{self, StoreBackend};
use traffic_splitter::domain::entities::Campaign;
use traffic_splitter::domain::repositories::CampaignStore;
use traffic_splitter::server::build_store;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};

type Service = CampaignService<dyn CampaignStore>;

/// CLI tool for managing traffic-splitter campaigns.
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
    /// Manage campaigns
    Campaign {
        #[command(subcommand)]
        action: CampaignAction,
    },

    /// Manage campaign links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Store operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Campaign management subcommands.
#[derive(Subcommand)]
enum CampaignAction {
    /// Create a new campaign
    Create {
        /// Campaign name (e.g., "Spring promo")
        #[arg(short, long)]
        name: Option<String>,

        /// Country code or label (e.g., "MA")
        #[arg(short, long)]
        country: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all campaigns
    List,

    /// Show a campaign and its links
    Show {
        /// Campaign id
        id: String,
    },

    /// Delete a campaign
    Delete {
        /// Campaign id
        id: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Append a weighted destination to a campaign
    Add {
        /// Campaign id
        id: String,

        /// Destination URL (http or https)
        url: String,

        /// Relative weight (finite, >= 0)
        weight: f64,
    },
}

/// Store operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check store connectivity
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    if config.store_backend == StoreBackend::Memory {
        anyhow::bail!("STORE_BACKEND=memory has nothing to administer; use 'file' or 'postgres'");
    }

    let store = build_store(&config)
        .await
        .context("Failed to open campaign store")?;
    let service = CampaignService::new(store);

    match cli.command {
        Commands::Campaign { action } => handle_campaign_action(action, &service).await?,
        Commands::Link { action } => handle_link_action(action, &service).await?,
        Commands::Db { action } => handle_db_action(action, &service).await?,
    }

    Ok(())
}

/// Dispatches campaign management commands.
async fn handle_campaign_action(action: CampaignAction, service: &Service) -> Result<()> {
    match action {
        CampaignAction::Create { name, country, yes } => {
            create_campaign(service, name, country, yes).await?;
        }
        CampaignAction::List => list_campaigns(service).await?,
        CampaignAction::Show { id } => show_campaign(service, &id).await?,
        CampaignAction::Delete { id, yes } => delete_campaign(service, &id, yes).await?,
    }

    Ok(())
}

/// Creates a campaign with interactive prompts for missing fields.
async fn create_campaign(
    service: &Service,
    name: Option<String>,
    country: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🎯 Create Campaign".bright_blue().bold());
    println!();

    let name = match name {
        Some(n) => n,
        None => Input::new().with_prompt("Campaign name").interact_text()?,
    };

    let country = match country {
        Some(c) => c,
        None => Input::new()
            .with_prompt("Country")
            .with_initial_text("MA")
            .interact_text()?,
    };

    println!("  Name:    {}", name.cyan());
    println!("  Country: {}", country.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this campaign?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let campaign = service
        .create_campaign(name, country)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create campaign: {}", e))?;

    println!();
    println!("{}", "✅ Campaign created successfully!".green().bold());
    println!("  Id: {}", campaign.id.bright_yellow().bold());
    println!();
    println!("{}", "Add destinations with:".bright_white());
    println!(
        "  {} admin -- link add {} https://example.com 50",
        "cargo run --bin".bright_cyan(),
        campaign.id
    );
    println!();

    Ok(())
}

/// Lists all campaigns.
///
/// # Output Format
///
/// ```text
/// 📋 Campaigns
///
///   ID        Name                           Country  Links  Created
///   ──────────────────────────────────────────────────────────────────────────
///   abc123    Demo                           MA       3      2026-03-01 10:30
/// ```
async fn list_campaigns(service: &Service) -> Result<()> {
    println!("{}", "📋 Campaigns".bright_blue().bold());
    println!();

    let campaigns = service
        .list_campaigns()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list campaigns: {}", e))?;

    if campaigns.is_empty() {
        println!("{}", "  No campaigns found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- campaign create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<30} {:<8} {:<6} {}",
        "ID".bright_white().bold(),
        "Name".bright_white().bold(),
        "Country".bright_white().bold(),
        "Links".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for campaign in &campaigns {
        let links = if campaign.is_resolvable() {
            campaign.links.len().to_string().green()
        } else {
            campaign.links.len().to_string().red()
        };

        println!(
            "  {:<9} {:<30} {:<8} {:<6} {}",
            campaign.id.bright_yellow(),
            campaign.name.cyan(),
            campaign.country,
            links,
            campaign
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        campaigns.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Shows a campaign with each link's share of the total weight.
async fn show_campaign(service: &Service, id: &str) -> Result<()> {
    let campaign = service
        .get_campaign(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_campaign(&campaign);
    Ok(())
}

fn print_campaign(campaign: &Campaign) {
    println!(
        "{} {}",
        "🎯".bright_blue(),
        campaign.name.bright_blue().bold()
    );
    println!();
    println!("  Id:      {}", campaign.id.bright_yellow());
    println!("  Country: {}", campaign.country.cyan());
    println!(
        "  Created: {}",
        campaign.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if campaign.links.is_empty() {
        println!("{}", "  No links yet".yellow());
        println!();
        return;
    }

    let total = campaign.total_weight();
    for (i, link) in campaign.links.iter().enumerate() {
        let share = if total > 0.0 {
            format!("{:>5.1}%", link.weight / total * 100.0)
        } else {
            "  -  ".to_string()
        };
        println!(
            "  {:>2}. {} {:<8} {}",
            i + 1,
            share.bright_green(),
            link.weight,
            link.url
        );
    }

    if !campaign.is_resolvable() {
        println!();
        println!(
            "{}",
            "  ⚠️  All weights are zero; redirects will fail".yellow()
        );
    }
    println!();
}

/// Deletes a campaign after confirmation (default: No).
async fn delete_campaign(service: &Service, id: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Campaign".bright_blue().bold());
    println!();

    let campaign = service
        .get_campaign(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Campaign: {}", campaign.name.cyan());
    println!("  Id:       {}", campaign.id.bright_black());
    println!("  Links:    {}", campaign.links.len());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this campaign?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_campaign(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete campaign: {}", e))?;

    println!("{}", "✅ Campaign deleted".green().bold());
    println!();

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, service: &Service) -> Result<()> {
    match action {
        LinkAction::Add { id, url, weight } => {
            let campaign = service
                .add_link(&id, &url, weight)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to add link: {}", e))?;

            println!("{}", "✅ Link added".green().bold());
            println!();
            print_campaign(&campaign);
        }
    }

    Ok(())
}

/// Handles store diagnostic commands.
async fn handle_db_action(action: DbAction, service: &Service) -> Result<()> {
    match action {
        DbAction::Check => {
            let store = service.store();
            println!(
                "{}",
                format!("🔍 Checking {} store...", store.backend_name()).bright_blue()
            );

            if !store.health_check().await {
                anyhow::bail!("{} store is not reachable", store.backend_name());
            }

            println!("{}", "✅ Store connection OK".green().bold());
        }
    }

    Ok(())
}
