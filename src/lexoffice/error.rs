use thiserror::Error;

/// Failure of a single upstream request. The cause matters for the log
/// file; tool handlers collapse all variants into their fixed failure
/// message.
#[derive(Debug, Error)]
pub enum LexofficeError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
