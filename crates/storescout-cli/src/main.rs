mod scan;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "storescout")]
#[command(about = "Norwegian Shopify storefront discovery")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for candidate storefronts, verify them, and export the results
    Scan {
        /// Stop once this many storefronts have verified
        #[arg(long, default_value_t = 100)]
        store_limit: usize,

        /// Stop once this many candidate URLs have been checked
        #[arg(long, default_value_t = 1000)]
        max_checks: usize,

        /// Path for the CSV export
        #[arg(long, default_value = "norwegian_shopify_stores.csv")]
        csv: PathBuf,

        /// Path for the JSON run report
        #[arg(long, default_value = "shopify_report.json")]
        report: PathBuf,

        /// Print the queries and limits that would be used, without searching
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the active search query list
    Queries,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = storescout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Scan {
            store_limit,
            max_checks,
            csv,
            report,
            dry_run,
        }) => scan::run_scan(&config, store_limit, max_checks, &csv, &report, dry_run).await,
        Some(Commands::Queries) => {
            for query in scan::active_queries(&config)? {
                println!("{query}");
            }
            Ok(())
        }
        None => {
            println!("no command given; run with --help to list commands");
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
