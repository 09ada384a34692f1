//! Retrieval service command.

use clap::Args;
use ragproxy_core::Config;
use ragproxy_gateway::{rag_routes, shutdown_signal, Gateway, GatewayConfig};
use ragproxy_retrieval::RagPipeline;
use std::sync::Arc;
use tracing::info;

/// Retrieval service command arguments.
#[derive(Args)]
pub struct RagArgs {
    #[command(subcommand)]
    pub command: RagCommand,
}

#[derive(clap::Subcommand)]
pub enum RagCommand {
    /// Start the retrieval API server
    Run {
        /// Listen address (overrides server.rag_listen)
        #[arg(short, long)]
        listen: Option<String>,
    },
}

/// Run the retrieval service command.
pub async fn run(args: RagArgs, config: &Config) -> anyhow::Result<()> {
    match args.command {
        RagCommand::Run { listen } => {
            let mut gateway_config = GatewayConfig::rag(config)?;
            if let Some(listen) = listen {
                gateway_config = gateway_config.with_listen(&listen)?;
            }

            let pipeline = RagPipeline::from_config(config)?;
            info!(
                chroma = %config.services.chroma_url,
                ollama = %config.services.ollama_url,
                collection = %config.retrieval.collection,
                "Starting retrieval API"
            );

            Gateway::new(gateway_config, rag_routes(Arc::new(pipeline)))
                .run(shutdown_signal())
                .await?;
            Ok(())
        }
    }
}
