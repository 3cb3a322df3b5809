//! Entry point wiring CLI parsing, configuration and the text-generation client.

use std::{io, process::ExitCode};

use anyhow::Result;
use gene_summary::{cli::Cli, config::Settings, logging, nlp::llm::OpenAiClient};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    logging::init_tracing()?;
    let cli = Cli::parse();
    let settings = Settings::load()?;
    let client = OpenAiClient::new(&settings.openai)?;

    debug!(?cli, endpoint = client.endpoint(), "starting");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    cli.dispatch(&settings, &client, &mut out).await
}
