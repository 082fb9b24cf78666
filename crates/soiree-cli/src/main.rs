use std::fs::File;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use soiree_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "soiree")]
#[command(author, version, about = "Terminal showcase for event-planning media")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Catalog JSON file (overrides general.catalog_path)
    #[arg(short = 'c', long, global = true)]
    catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the terminal showcase
    Run,
    /// List catalog items
    Catalog {
        /// Only this section (hero, testimonials, gallery, featured, comparisons)
        #[arg(short = 's', long)]
        section: Option<String>,
        /// Gallery-style category filter ("All" keeps everything)
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive text search
        #[arg(short = 'q', long)]
        search: Option<String>,
        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show testimonial statistics
    Stats,
    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the configuration file path
    Path,
}

/// Install the tracing subscriber; the TUI logs to a file so stdout stays clean
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let (file_layer, stderr_layer) = if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::options().create(true).append(true).open(&log_path)?;
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_ansi(false)
            .with_writer(Mutex::new(file));
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    let is_tui = matches!(cli.command, Some(Commands::Run) | None);
    init_logging(&config, is_tui)?;

    let catalog_path = cli.catalog.or_else(|| config.catalog_path());

    match cli.command {
        Some(Commands::Run) | None => commands::run::run(config, catalog_path).await,
        Some(Commands::Catalog {
            section,
            category,
            search,
            json,
        }) => commands::catalog::run(
            catalog_path.as_deref(),
            section.as_deref(),
            category,
            search,
            json,
        ),
        Some(Commands::Stats) => commands::stats::run(catalog_path.as_deref()),
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { force } => commands::config::init(&config, force),
            ConfigAction::Path => commands::config::path(),
        },
    }
}
