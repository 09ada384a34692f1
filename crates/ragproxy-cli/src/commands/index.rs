//! Index command.

use clap::Args;
use ragproxy_core::{Config, DocumentBatch, DocumentRecord};
use ragproxy_providers::RagApiClient;
use serde_json::json;

/// Index command arguments.
#[derive(Args)]
pub struct IndexArgs {
    /// Texts to index, one document each
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Document id; numbered `<id>-<n>` when several texts are given
    #[arg(long)]
    pub id: Option<String>,
}

/// Build the batch sent for `texts`.
pub fn build_batch(texts: Vec<String>, id: Option<&str>) -> DocumentBatch {
    let count = texts.len();
    texts
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let id = match id {
                Some(id) if count == 1 => id.to_string(),
                Some(id) => format!("{}-{}", id, i + 1),
                None => uuid::Uuid::new_v4().to_string(),
            };
            DocumentRecord::new(id, text).with_metadata("origin", json!("cli"))
        })
        .collect()
}

/// Run the index command.
pub async fn run(args: IndexArgs, config: &Config) -> anyhow::Result<()> {
    let client = RagApiClient::from_config(config)?;
    let batch = build_batch(args.texts, args.id.as_deref());

    let ack = client.index(&batch).await?;
    println!("{} ({} documents)", ack.message, batch.len());
    Ok(())
}
