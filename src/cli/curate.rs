//! CLI entry-point for the full curation workflow.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::instrument;

use crate::{
    cli::PaperQuery,
    config::Settings,
    data::{self, genedb::GeneDbClient, pubmed::PubmedClient},
    nlp::{self, llm::TextGenerator},
};

/// Fetch, curate and print the report as pretty JSON.
#[instrument(skip(settings, generator, out))]
pub async fn run<G, W>(query: &PaperQuery, settings: &Settings, generator: &G, out: &mut W) -> Result<()>
where
    G: TextGenerator + ?Sized,
    W: Write,
{
    let client = data::http_client()?;
    let pubmed = PubmedClient::new(client.clone(), &settings.literature);
    let genedb = GeneDbClient::new(client, &settings.literature);

    let report = nlp::curate(generator, &settings.api_key, &pubmed, &genedb, query).await?;
    serde_json::to_writer_pretty(&mut *out, &report).context("writing report")?;
    writeln!(out).context("writing report")?;
    Ok(())
}
