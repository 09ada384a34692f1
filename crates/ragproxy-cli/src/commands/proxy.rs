//! Ollama-compatible proxy command.

use clap::Args;
use ragproxy_core::Config;
use ragproxy_gateway::{proxy_routes, shutdown_signal, Gateway, GatewayConfig, ProxyState};
use ragproxy_providers::OllamaClient;
use ragproxy_retrieval::{RagPipeline, RemoteRetriever, Retriever};
use std::sync::Arc;
use tracing::info;

/// Proxy command arguments.
#[derive(Args)]
pub struct ProxyArgs {
    #[command(subcommand)]
    pub command: ProxyCommand,
}

#[derive(clap::Subcommand)]
pub enum ProxyCommand {
    /// Start the proxy server
    Run {
        /// Listen address (overrides server.proxy_listen)
        #[arg(short, long)]
        listen: Option<String>,

        /// Run retrieval in-process instead of calling the retrieval API
        #[arg(long)]
        embedded: bool,
    },
}

/// Run the proxy command.
pub async fn run(args: ProxyArgs, config: &Config) -> anyhow::Result<()> {
    match args.command {
        ProxyCommand::Run { listen, embedded } => {
            let mut gateway_config = GatewayConfig::proxy(config)?;
            if let Some(listen) = listen {
                gateway_config = gateway_config.with_listen(&listen)?;
            }

            let retriever: Arc<dyn Retriever> = if embedded {
                info!("Using in-process retrieval");
                Arc::new(RagPipeline::from_config(config)?)
            } else {
                info!("Using retrieval API at {}", config.services.rag_api_url);
                Arc::new(RemoteRetriever::from_config(config)?)
            };
            let ollama = Arc::new(OllamaClient::from_config(config)?);

            Gateway::new(gateway_config, proxy_routes(ProxyState::new(retriever, ollama)))
                .run(shutdown_signal())
                .await?;
            Ok(())
        }
    }
}
