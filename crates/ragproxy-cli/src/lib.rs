//! ragproxy command-line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use ragproxy_core::config::{Config, LoggingConfig};
use ragproxy_core::env::vars;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// ragproxy - retrieval-augmented generation behind an Ollama-compatible API
#[derive(Parser)]
#[command(name = "ragproxy")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = vars::CONFIG, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Serve the retrieval API
    Rag(commands::rag::RagArgs),

    /// Serve the Ollama-compatible proxy
    Proxy(commands::proxy::ProxyArgs),

    /// Ask the retrieval service a question
    Query(commands::query::QueryArgs),

    /// Index texts through the retrieval service
    Index(commands::index::IndexArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    match cli.command {
        Commands::Rag(args) => commands::rag::run(args, &config).await,
        Commands::Proxy(args) => commands::proxy::run(args, &config).await,
        Commands::Query(args) => commands::query::run(args, &config).await,
        Commands::Index(args) => commands::index::run(args, &config).await,
        Commands::Version => {
            println!("ragproxy {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Filter directive for the configured level and `-v` count.
pub fn filter_directive(logging: &LoggingConfig, verbose: u8) -> String {
    match verbose {
        0 => logging.level.clone(),
        1 => "ragproxy=debug,tower_http=debug".to_string(),
        _ => "ragproxy=trace,tower_http=trace".to_string(),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over everything else.
pub fn init_logging(logging: &LoggingConfig, verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(logging, verbose)));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
