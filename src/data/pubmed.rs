//! PubMed Central open-access full text via the BioC JSON service.

use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::{
    config::LiteratureSettings,
    error::{SourceError, SourceResult},
};

/// BioC section types kept for gene curation.
pub const CURATION_SECTIONS: &[&str] = &[
    "TITLE", "FIG", "TABLE", "ABSTRACT", "INTRO", "RESULTS", "CONCL",
];

/// Client for `GET {prefix}{pubmed_id}`.
#[derive(Debug, Clone)]
pub struct PubmedClient {
    client: Client,
    base_url: String,
}

impl PubmedClient {
    pub fn new(client: Client, settings: &LiteratureSettings) -> Self {
        Self {
            client,
            base_url: settings.pubmed_bioc_url.clone(),
        }
    }

    /// Fetch the BioC collections for `pubmed_id`.
    #[instrument(skip(self))]
    pub async fn fetch_bioc(&self, pubmed_id: &str) -> SourceResult<Vec<BiocCollection>> {
        let url = format!("{}{}", self.base_url, pubmed_id);
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(SourceError::Status {
                pubmed_id: pubmed_id.to_string(),
                status: status.as_u16(),
            });
        }
        // Unknown papers come back as an HTML page with status 200.
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));
        if !is_json {
            return Err(SourceError::PaperNotFound {
                pubmed_id: pubmed_id.to_string(),
            });
        }

        let body = resp.text().await?;
        let payload: BiocPayload = serde_json::from_str(&body)?;
        let collections = payload.into_vec();
        info!(collections = collections.len(), "fetched BioC document");
        Ok(collections)
    }

    /// Fetch and flatten the curation-relevant text of a paper.
    pub async fn fetch_paper_text(&self, pubmed_id: &str) -> SourceResult<String> {
        let collections = self.fetch_bioc(pubmed_id).await?;
        Ok(parse_bioc(&collections))
    }
}

/// Concatenate the text of curation sections in document order, one passage per line.
pub fn parse_bioc(collections: &[BiocCollection]) -> String {
    let mut text = String::new();
    let mut kept = 0usize;
    for passage in collections
        .iter()
        .flat_map(|c| &c.documents)
        .flat_map(|d| &d.passages)
    {
        let section = passage.infons.section_type.as_deref().unwrap_or_default();
        if !CURATION_SECTIONS
            .iter()
            .any(|s| s.eq_ignore_ascii_case(section))
        {
            continue;
        }
        if let Some(passage_text) = &passage.text {
            text.push_str(passage_text);
            text.push('\n');
            kept += 1;
        }
    }
    debug!(passages = kept, chars = text.len(), "assembled paper text");
    text
}

/// The service returns a list of collections, occasionally a bare one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BiocPayload {
    Many(Vec<BiocCollection>),
    One(BiocCollection),
}

impl BiocPayload {
    fn into_vec(self) -> Vec<BiocCollection> {
        match self {
            Self::Many(collections) => collections,
            Self::One(collection) => vec![collection],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BiocCollection {
    #[serde(default)]
    pub documents: Vec<BiocDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BiocDocument {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub passages: Vec<BiocPassage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BiocPassage {
    #[serde(default)]
    pub infons: BiocInfons,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BiocInfons {
    #[serde(default)]
    pub section_type: Option<String>,
}
