//! Command-line interface wiring for gene-summary.

use std::io::Write;

use anyhow::Result;
use clap::Parser;

use crate::{config::Settings, nlp::llm::TextGenerator};

pub mod curate;
pub mod summarize;

/// Gene used when no identifiers are given.
pub const DEFAULT_GENE_ID: &str = "PF3D7_1133400";
/// Paper used when no identifiers are given.
pub const DEFAULT_PUBMED_ID: &str = "27128092";

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Summarise what a paper says about a gene using an AI text-generation service",
    long_about = None
)]
pub struct Cli {
    /// Gene identifier, e.g. PF3D7_1133400. Must be given together with PUBMED_ID.
    /// Ids that collide with a flag (such as `--curate`) go after `--`.
    #[arg(requires = "pubmed_id", allow_hyphen_values = true)]
    pub gene_id: Option<String>,
    /// PubMed identifier of the paper, e.g. 27128092.
    #[arg(allow_hyphen_values = true)]
    pub pubmed_id: Option<String>,
    /// Fetch the paper text and gene synonyms and print a JSON curation report.
    #[arg(long)]
    pub curate: bool,
}

/// The gene/paper pair a run is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperQuery {
    pub gene_id: String,
    pub pubmed_id: String,
}

impl PaperQuery {
    pub fn new(gene_id: impl Into<String>, pubmed_id: impl Into<String>) -> Self {
        Self {
            gene_id: gene_id.into(),
            pubmed_id: pubmed_id.into(),
        }
    }
}

impl Default for PaperQuery {
    fn default() -> Self {
        Self::new(DEFAULT_GENE_ID, DEFAULT_PUBMED_ID)
    }
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Identifiers for this run: both given, or the defaults.
    pub fn query(&self) -> Result<PaperQuery> {
        match (&self.gene_id, &self.pubmed_id) {
            (Some(gene_id), Some(pubmed_id)) => Ok(PaperQuery::new(gene_id, pubmed_id)),
            (None, None) => Ok(PaperQuery::default()),
            _ => anyhow::bail!("expected both GENE_ID and PUBMED_ID, or neither"),
        }
    }

    /// Run the selected mode, writing the result to `out`.
    pub async fn dispatch<G, W>(self, settings: &Settings, generator: &G, out: &mut W) -> Result<()>
    where
        G: TextGenerator + ?Sized,
        W: Write,
    {
        let query = self.query()?;
        if self.curate {
            curate::run(&query, settings, generator, out).await
        } else {
            summarize::run(&query, settings, generator, out).await
        }
    }
}
