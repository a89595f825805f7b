//! HTTP client for the Lexware Office REST API.

use log::{error, info};
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::Config;

use super::error::LexofficeError;

const USER_AGENT: &str = concat!("lexware-office-mcp/", env!("CARGO_PKG_VERSION"));

pub struct LexofficeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl LexofficeClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create reqwest client");

        Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Perform exactly one GET against the API and decode the body as JSON.
    ///
    /// `path` must begin with the version segment (`/v1/...`) and carry an
    /// already encoded query string. No timeout and no retry; both the
    /// outbound URL and the full response body are logged.
    pub async fn get_json(&self, path: &str) -> Result<Value, LexofficeError> {
        let url = format!("{}{}", self.base_url, path);
        info!("Making Lexware Office request: {}", url);

        match self.fetch(&url).await {
            Ok(json) => {
                info!(
                    "Lexware Office response from {}:\n{}",
                    url,
                    serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
                );
                Ok(json)
            }
            Err(err) => {
                error!("Lexware Office request failed: {}", err);
                Err(err)
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<Value, LexofficeError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|source| LexofficeError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| LexofficeError::Transport {
                url: url.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(LexofficeError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| LexofficeError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
