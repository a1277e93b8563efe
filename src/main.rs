use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use yatra::config::DataMode;
use yatra::destination::suggest_destinations;
use yatra::notify::TracingNotifier;
use yatra::{Budget, ItineraryService, PlannerConfig, TravelRequest, telemetry, web};

#[derive(Debug, Parser)]
#[command(name = "yatra", version)]
#[command(about = "Plan trips across India from live map, weather and lodging data")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build an itinerary and print it
    Plan {
        #[arg(short, long)]
        destination: String,
        #[arg(long, default_value_t = 3)]
        days: u32,
        #[arg(short, long, default_value_t = Budget::Moderate)]
        budget: Budget,
        #[arg(short, long, default_value = "solo")]
        travelers: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
        /// Synthesize every section without calling external services
        #[arg(long)]
        offline: bool,
    },
    /// Serve the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// List popular destinations matching a query
    Destinations { query: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = PlannerConfig::load_from_path(cli.config)?;
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    telemetry::init(&config.logging)?;

    match cli.command {
        Commands::Plan {
            destination,
            days,
            budget,
            travelers,
            json,
            offline,
        } => {
            if offline {
                config.itinerary.mode = DataMode::Offline;
            }
            let request = TravelRequest::from_form(&destination, days, budget, &travelers)?;

            let service = ItineraryService::from_config(&config)?;
            let itinerary = service.plan(&request, &TracingNotifier).await;

            if json {
                let rendered = serde_json::to_string_pretty(&itinerary)
                    .context("Failed to serialize itinerary")?;
                println!("{rendered}");
            } else {
                println!("{itinerary}");
            }
        }
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let service = Arc::new(ItineraryService::from_config(&config)?);
            web::run(&config.server, service).await?;
        }
        Commands::Destinations { query } => {
            let suggestions = suggest_destinations(&query);
            if suggestions.is_empty() {
                println!("No popular destinations match '{query}'");
            }
            for suggestion in suggestions {
                println!("{suggestion}");
            }
        }
    }

    Ok(())
}
