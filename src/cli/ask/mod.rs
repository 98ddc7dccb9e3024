//! Ask command - runs the pipeline once against a local file

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::domain::document::DocumentInput;
use crate::infrastructure::logging::init_cli_logging;

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Policy document (PDF or plain text)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Question about the policy
    #[arg(short, long)]
    pub query: String,

    /// Print the response on one line
    #[arg(long)]
    pub compact: bool,
}

/// Print the response JSON on stdout
pub async fn run(config: AppConfig, args: AskArgs) -> anyhow::Result<()> {
    init_cli_logging(&config.logging);

    let bytes = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let mut document = DocumentInput::new(bytes);
    if let Some(name) = args.file.file_name().and_then(|n| n.to_str()) {
        document = document.with_filename(name);
    }

    let state = crate::create_app_state(&config)?;
    info!(file = %args.file.display(), "Answering question");

    let response = state
        .advisor
        .process_document_and_query(&document, &args.query)
        .await?;

    let output = if args.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{}", output);

    Ok(())
}
