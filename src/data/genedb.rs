//! Gene alias lookup against a VEuPathDB record service (PlasmoDB by default).

use std::collections::BTreeSet;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::{config::LiteratureSettings, error::SourceResult};

/// Client for the gene record endpoint.
#[derive(Debug, Clone)]
pub struct GeneDbClient {
    client: Client,
    url: String,
    project: String,
}

impl GeneDbClient {
    pub fn new(client: Client, settings: &LiteratureSettings) -> Self {
        Self {
            client,
            url: settings.gene_alias_url.clone(),
            project: settings.gene_alias_project.clone(),
        }
    }

    /// Known aliases for `gene_id`. A non-200 answer yields no aliases.
    #[instrument(skip(self))]
    pub async fn aliases(&self, gene_id: &str) -> SourceResult<Vec<String>> {
        let request = RecordRequest::for_gene(gene_id, &self.project);
        let resp = self.client.post(&self.url).json(&request).send().await?;

        if resp.status() != StatusCode::OK {
            warn!(status = %resp.status(), "alias lookup failed; continuing without synonyms");
            return Ok(Vec::new());
        }

        let body = resp.text().await?;
        let record: RecordResponse = serde_json::from_str(&body)?;
        let aliases = record.aliases();
        info!(count = aliases.len(), "fetched gene aliases");
        Ok(aliases)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecordRequest<'a> {
    attributes: Vec<&'a str>,
    primary_key: [PrimaryKeyPart<'a>; 2],
    tables: [&'a str; 2],
}

impl<'a> RecordRequest<'a> {
    fn for_gene(gene_id: &'a str, project: &'a str) -> Self {
        Self {
            attributes: Vec::new(),
            primary_key: [
                PrimaryKeyPart {
                    name: "source_id",
                    value: gene_id,
                },
                PrimaryKeyPart {
                    name: "project_id",
                    value: project,
                },
            ],
            tables: ["AllProducts", "Alias"],
        }
    }
}

#[derive(Debug, Serialize)]
struct PrimaryKeyPart<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct RecordResponse {
    #[serde(default)]
    tables: Option<RecordTables>,
}

#[derive(Debug, Default, Deserialize)]
struct RecordTables {
    #[serde(rename = "Alias", default)]
    alias: Vec<AliasRow>,
}

#[derive(Debug, Deserialize)]
struct AliasRow {
    alias: Option<String>,
}

impl RecordResponse {
    fn aliases(self) -> Vec<String> {
        self.tables
            .map(|t| t.alias)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|row| row.alias)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
