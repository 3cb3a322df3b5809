//! Literature and gene database access.

pub mod genedb;
pub mod pubmed;

use anyhow::Result;
use reqwest::Client;

/// HTTP client shared by the literature sources and the text-generation client.
pub fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .user_agent(concat!("gene-summary/", env!("CARGO_PKG_VERSION")))
        .gzip(true)
        .brotli(true)
        .build()?)
}
