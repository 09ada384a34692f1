//! ragproxy CLI entry point.

use anyhow::Context;
use clap::Parser;
use ragproxy_cli::{init_logging, run, Cli};
use ragproxy_core::{env, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing, so .env can supply RAGPROXY_CONFIG
    env::load_dotenv().context("Failed to read .env")?;

    let cli = Cli::parse();

    let config = Config::resolve(cli.config.as_deref()).context("Failed to load configuration")?;

    init_logging(&config.logging, cli.verbose);

    run(cli, config).await
}
