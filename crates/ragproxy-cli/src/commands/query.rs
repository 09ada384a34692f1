//! Query command.

use clap::Args;
use ragproxy_core::{Config, QueryRequest, DEFAULT_RESULT_COUNT};
use ragproxy_providers::RagApiClient;

/// Query command arguments.
#[derive(Args)]
pub struct QueryArgs {
    /// Question to ask
    pub text: String,

    /// Number of documents to retrieve
    #[arg(short = 'n', long, default_value_t = DEFAULT_RESULT_COUNT, allow_negative_numbers = true)]
    pub n_results: i64,
}

/// Run the query command.
pub async fn run(args: QueryArgs, config: &Config) -> anyhow::Result<()> {
    let client = RagApiClient::from_config(config)?;
    let request = QueryRequest::new(args.text).with_results(args.n_results);

    let response = client.query(&request).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
