//! Shelf-Harvest main entry point
//!
//! This is the command-line interface for the Shelf-Harvest catalog harvester.

use clap::Parser;
use shelf_harvest::config::{load_config_with_hash, validate, Config};
use shelf_harvest::crawler::{list_categories, run_harvest, PageFetcher};
use shelf_harvest::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Shelf-Harvest: a catalog harvester for paginated book storefronts
///
/// Walks every category of the storefront, follows its pagination, and
/// writes one semicolon-delimited CSV plus one image folder per category.
#[derive(Parser, Debug)]
#[command(name = "shelf-harvest")]
#[command(version)]
#[command(about = "Harvest a book storefront into per-category CSV files", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults target books.toscrape.com)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the configuration and the categories that would be harvested, then exit
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_configuration(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config).await?;
    } else {
        handle_harvest(config, cli.quiet).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_harvest=info,warn"),
            1 => EnvFilter::new("shelf_harvest=debug,info"),
            2 => EnvFilter::new("shelf_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, otherwise the defaults
fn load_configuration(
    path: Option<&std::path::Path>,
) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

/// Handles the --dry-run mode: shows the configuration and category list
async fn handle_dry_run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Shelf-Harvest Dry Run ===\n");

    println!("Site:");
    println!("  Root: {}", config.site.root_base());
    println!("  Catalogue base: {}", config.site.catalogue_base());
    println!("  Image origin: {}", config.site.image_origin());

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nOutput:");
    println!("  Data root: {}", config.output.data_root.display());
    println!("  Title length limit: {}", config.output.title_max_chars);
    println!("  Images: {}", if config.harvest.skip_images { "skipped" } else { "downloaded" });

    if !config.harvest.categories.is_empty() {
        println!("\nCategory filter ({}):", config.harvest.categories.len());
        for name in &config.harvest.categories {
            println!("  - {}", name);
        }
    }

    let fetcher = PageFetcher::from_config(config)?;
    let categories = list_categories(&fetcher, &config.site.root_base()).await?;

    println!("\nCategories found ({}):", categories.len());
    for url in &categories {
        println!("  * {}", url);
    }

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the main harvest operation
async fn handle_harvest(config: Config, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Harvesting {} into {}",
        config.site.root_base(),
        config.output.data_root.display()
    );

    match run_harvest(config).await {
        Ok(report) => {
            if !quiet {
                print_report(&report);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}
