use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use grift::config::Config;
use grift::graph::{EntityType, GraphStore, SqliteGraphStore};
use grift::output::terminal;
use grift::pipeline::{self, InputType, ScanOptions};

/// Grift: multi-signal scam and fraud risk scanner.
///
/// Checks websites, messages, phone numbers, emails, and crypto wallets
/// against local heuristics, free threat-intelligence feeds, and an entity
/// graph of previously-seen identifiers.
#[derive(Parser)]
#[command(name = "grift", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the entity graph database
    Init,

    /// Scan an input for scam signals
    Scan {
        /// What you're scanning: website, message, phone, email, crypto, or other
        #[arg(long, default_value = "other")]
        input_type: InputType,

        /// The URL, message text, phone number, email address, or wallet
        input: String,

        /// Skip external reputation lookups (local detectors only)
        #[arg(long)]
        offline: bool,

        /// Print the full report as JSON instead of colored text
        #[arg(long)]
        json: bool,
    },

    /// Look up an entity's network risk from the graph
    Lookup {
        /// Entity type: email, phone, url, domain, crypto_wallet, ip, username
        #[arg(long, default_value = "domain")]
        entity_type: String,

        /// The entity value to look up
        value: String,
    },

    /// Record an external report against an entity (bumps its report count)
    Report {
        /// Entity type: email, phone, url, domain, crypto_wallet, ip, username
        #[arg(long, default_value = "domain")]
        entity_type: String,

        /// The entity value being reported
        value: String,

        /// Also flag the entity as a confirmed scam
        #[arg(long)]
        confirmed: bool,
    },

    /// Show database statistics
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("grift=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            info!("Initializing grift database...");
            let store = open_store(&config).await?;
            let stats = store.stats().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Entities tracked: {}", stats.entity_count);
            println!("\nReady. Try: grift scan --input-type website https://example.com");
        }

        Commands::Scan {
            input_type,
            input,
            offline,
            json,
        } => {
            let store = open_store(&config).await?;
            let osint = if offline {
                None
            } else {
                Some(grift::osint::default_coordinator(&config)?)
            };

            let report = pipeline::scan(
                input_type,
                &input,
                ScanOptions {
                    store: Some(&store),
                    osint: osint.as_ref(),
                },
            )
            .await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                terminal::display_report(&report);
                if offline {
                    println!(
                        "{}",
                        "  (offline scan — external reputation sources were skipped)".dimmed()
                    );
                }
            }
        }

        Commands::Lookup { entity_type, value } => {
            let entity_type = parse_entity_type(&entity_type)?;
            let store = open_store(&config).await?;

            match store.get_entity(entity_type, &value).await? {
                Some(entity) => {
                    let score = grift::graph::calculate_risk_score(&store, entity.id).await?;
                    terminal::display_lookup(&entity.value, &score);
                }
                None => {
                    println!("No {entity_type} entity {value:?} in the graph yet.");
                    println!("Entities are recorded automatically when scans see them.");
                }
            }
        }

        Commands::Report {
            entity_type,
            value,
            confirmed,
        } => {
            let entity_type = parse_entity_type(&entity_type)?;
            let store = open_store(&config).await?;

            // Make sure the entity exists so a report is never lost
            let (entity, created) = store.upsert_entity(entity_type, &value).await?;
            store.increment_report_count(entity_type, &value).await?;
            if confirmed {
                store.mark_confirmed_scam(entity_type, &value).await?;
                println!(
                    "Recorded report and {} flag for {} {}",
                    "confirmed-scam".red().bold(),
                    entity_type,
                    entity.value
                );
            } else {
                println!("Recorded report for {} {}", entity_type, entity.value);
            }
            if created {
                println!("(entity was new — added to the graph)");
            }
        }

        Commands::Status => {
            let store = open_store(&config).await?;
            let stats = store.stats().await?;
            terminal::display_status(&config.db_path, &stats);
        }
    }

    Ok(())
}

/// Open the SQLite graph store and make sure the schema exists.
async fn open_store(config: &Config) -> Result<SqliteGraphStore> {
    let store = SqliteGraphStore::open(&config.db_path)?;
    store.init().await?;
    Ok(store)
}

fn parse_entity_type(raw: &str) -> Result<EntityType> {
    EntityType::parse(raw).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown entity type {raw:?} (expected email, phone, url, domain, \
             crypto_wallet, ip, or username)"
        )
    })
}
