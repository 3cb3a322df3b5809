//! Error taxonomy for configuration, the text-generation service and the
//! literature sources.

/// Result alias for text-generation calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result alias for literature and gene database lookups.
pub type SourceResult<T> = Result<T, SourceError>;

/// Problems resolving runtime settings. Raised before any network activity.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable {name}")]
    Missing { name: &'static str },

    /// A variable is set but cannot be parsed.
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Failures talking to the text-generation service.
#[derive(thiserror::Error, Debug)]
pub enum ServiceError {
    /// Transport failure (DNS, TLS, connection refused, ...).
    #[error("text-generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("text-generation service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The body could not be decoded as a completion.
    #[error("malformed completion response: {0}")]
    Malformed(String),

    /// The completion carried no text.
    #[error("text-generation service returned no content")]
    EmptyCompletion,
}

impl ServiceError {
    /// Build a status error from a response body, preferring the service's own message.
    #[must_use]
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());
        Self::Status { status, message }
    }
}

/// Failures fetching paper text or gene aliases.
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    /// Transport failure.
    #[error("literature request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The BioC service has no open-access text for this id.
    #[error("paper {pubmed_id} not found")]
    PaperNotFound { pubmed_id: String },

    /// Unexpected status from the paper service.
    #[error("paper {pubmed_id} fetch returned status {status}")]
    Status { pubmed_id: String, status: u16 },

    /// Body did not match the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}
