//! Runtime configuration utilities for gene-summary.

use std::{env, fmt, str::FromStr};

use crate::error::ConfigError;

/// Variable holding the text-generation credential.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
const DEFAULT_MAX_TOKENS: u32 = 16_384;
const DEFAULT_TEMPERATURE: f32 = 0.0;
const DEFAULT_PUBMED_BIOC_URL: &str =
    "https://www.ncbi.nlm.nih.gov/research/bionlp/RESTful/pmcoa.cgi/BioC_json/";
const DEFAULT_GENE_ALIAS_URL: &str =
    "https://plasmodb.org/plasmo/service/record-types/gene/records";
const DEFAULT_GENE_ALIAS_PROJECT: &str = "PlasmoDB";

/// Secret used to authenticate against the text-generation service.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Text-generation service settings.
#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    /// API root, without the trailing `/chat/completions`.
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Endpoints for paper text and gene aliases.
#[derive(Debug, Clone)]
pub struct LiteratureSettings {
    /// Prefix the PubMed id is appended to.
    pub pubmed_bioc_url: String,
    pub gene_alias_url: String,
    pub gene_alias_project: String,
}

/// Application configuration resolved from `.env`, the environment and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: ApiKey,
    pub openai: OpenAiSettings,
    pub literature: LiteratureSettings,
}

impl Settings {
    /// Load configuration from `.env` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Resolve settings through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR)
            .map(ApiKey::new)
            .ok_or(ConfigError::Missing { name: API_KEY_VAR })?;

        let openai = OpenAiSettings {
            base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            max_tokens: parse_var("OPENAI_MAX_TOKENS", get("OPENAI_MAX_TOKENS"))?
                .unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: parse_var("OPENAI_TEMPERATURE", get("OPENAI_TEMPERATURE"))?
                .unwrap_or(DEFAULT_TEMPERATURE),
        };

        let literature = LiteratureSettings {
            pubmed_bioc_url: get("PUBMED_BIOC_URL")
                .unwrap_or_else(|| DEFAULT_PUBMED_BIOC_URL.to_string()),
            gene_alias_url: get("GENE_ALIAS_URL")
                .unwrap_or_else(|| DEFAULT_GENE_ALIAS_URL.to_string()),
            gene_alias_project: get("GENE_ALIAS_PROJECT")
                .unwrap_or_else(|| DEFAULT_GENE_ALIAS_PROJECT.to_string()),
        };

        Ok(Self {
            api_key,
            openai,
            literature,
        })
    }
}

fn parse_var<T>(name: &'static str, raw: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(value) = raw else {
        return Ok(None);
    };
    let parsed = value.trim().parse::<T>();
    match parsed {
        Ok(parsed) => Ok(Some(parsed)),
        Err(err) => Err(ConfigError::Invalid {
            name,
            reason: err.to_string(),
            value,
        }),
    }
}
