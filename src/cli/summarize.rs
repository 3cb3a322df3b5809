//! CLI entry-point for the one-shot relevance summary.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::instrument;

use crate::{cli::PaperQuery, config::Settings, nlp, nlp::llm::TextGenerator};

/// Print the service's text exactly as returned.
#[instrument(skip(settings, generator, out))]
pub async fn run<G, W>(query: &PaperQuery, settings: &Settings, generator: &G, out: &mut W) -> Result<()>
where
    G: TextGenerator + ?Sized,
    W: Write,
{
    let summary = nlp::summarize(generator, &settings.api_key, query).await?;
    out.write_all(summary.as_bytes()).context("writing summary")?;
    out.flush().context("writing summary")?;
    Ok(())
}
