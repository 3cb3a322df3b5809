//! Prompt orchestration over a [`llm::TextGenerator`].

pub mod llm;
pub mod prompts;
pub mod synonyms;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    cli::PaperQuery,
    config::ApiKey,
    data::{genedb::GeneDbClient, pubmed::PubmedClient},
    error::ServiceResult,
};
use llm::{ChatMessage, TextGenerator};
use prompts::{clean_output, gene_label, Stage, SYSTEM_PROMPT};

/// Send the curator system message followed by `user_messages`, one user turn each.
pub async fn call_prompt<G>(generator: &G, key: &ApiKey, user_messages: &[&str]) -> ServiceResult<String>
where
    G: TextGenerator + ?Sized,
{
    let mut messages = Vec::with_capacity(user_messages.len() + 1);
    messages.push(ChatMessage::system(SYSTEM_PROMPT));
    messages.extend(user_messages.iter().map(|m| ChatMessage::user(*m)));
    generator.generate(key, &messages).await
}

/// Ask for a summary of the paper's relevance to the gene in a single call.
/// The returned text is exactly what the service produced.
#[instrument(skip(generator, key))]
pub async fn summarize<G>(generator: &G, key: &ApiKey, query: &PaperQuery) -> Result<String>
where
    G: TextGenerator + ?Sized,
{
    let prompt = prompts::relevance_prompt(&query.gene_id, &query.pubmed_id);
    let text = call_prompt(generator, key, &[prompt.as_str()])
        .await
        .context("requesting summary")?;
    info!(chars = text.len(), "received summary");
    Ok(text)
}

/// Everything the curation workflow produced for one gene/paper pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurationReport {
    pub gene_id: String,
    pub pubmed_id: String,
    pub title: String,
    pub short_summary: String,
    pub summary: String,
    pub extract: String,
    pub synonyms: Vec<String>,
    pub paper_text: String,
}

/// Run the prompt chain over already-fetched paper text.
#[instrument(skip(generator, key, paper_text, synonyms), fields(chars = paper_text.len()))]
pub async fn curate_text<G>(
    generator: &G,
    key: &ApiKey,
    query: &PaperQuery,
    paper_text: String,
    synonyms: Vec<String>,
) -> Result<CurationReport>
where
    G: TextGenerator + ?Sized,
{
    let label = gene_label(&query.gene_id, &synonyms);

    let extract_prompt = Stage::Extract.prompt(&label);
    let extract = call_prompt(generator, key, &[paper_text.as_str(), extract_prompt.as_str()])
        .await
        .context("extracting gene evidence")?;

    let summary_prompt = Stage::Summary.prompt(&label);
    let summary = call_prompt(generator, key, &[extract.as_str(), summary_prompt.as_str()])
        .await
        .map(|s| clean_output(&s))
        .context("summarising gene evidence")?;

    let short_prompt = Stage::ShortSummary.prompt(&label);
    let title_prompt = Stage::Title.prompt(&label);
    let (short_summary, title) = futures::try_join!(
        async {
            call_prompt(generator, key, &[summary.as_str(), short_prompt.as_str()])
                .await
                .context("writing short summary")
        },
        async {
            call_prompt(generator, key, &[extract.as_str(), title_prompt.as_str()])
                .await
                .context("writing title")
        },
    )?;

    Ok(CurationReport {
        gene_id: query.gene_id.clone(),
        pubmed_id: query.pubmed_id.clone(),
        title: clean_output(&title),
        short_summary: clean_output(&short_summary),
        summary,
        extract,
        synonyms,
        paper_text,
    })
}

/// Fetch the paper, pick synonyms and run the full curation chain.
#[instrument(skip(generator, key, pubmed, genedb))]
pub async fn curate<G>(
    generator: &G,
    key: &ApiKey,
    pubmed: &PubmedClient,
    genedb: &GeneDbClient,
    query: &PaperQuery,
) -> Result<CurationReport>
where
    G: TextGenerator + ?Sized,
{
    let paper_text = pubmed
        .fetch_paper_text(&query.pubmed_id)
        .await
        .with_context(|| format!("fetching paper {}", query.pubmed_id))?;
    let aliases = genedb
        .aliases(&query.gene_id)
        .await
        .with_context(|| format!("looking up aliases for {}", query.gene_id))?;
    let synonyms = synonyms::rank_synonyms(&query.gene_id, &aliases, &paper_text);
    info!(?synonyms, "selected synonyms");

    curate_text(generator, key, query, paper_text, synonyms).await
}
