//! HTTP client for the generator backend.

use super::module::Module;
use super::response::{ErrorBody, HealthStatus, ScenarioRequest, ScenarioResponse};
use crate::config::Config;
use crate::error::{Error, Result};
use std::time::Duration;
use tracing::{debug, warn};

const GENERATE_PATH: &str = "/api/generate-scenario";
const HEALTH_PATH: &str = "/health";

/// Client for the scenario generator.
#[derive(Debug, Clone)]
pub struct ScenarioClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScenarioClient {
    /// Create a client for `base_url`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.base_url.as_str(), config.request_timeout())
    }

    /// The backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a scenario for `module`.
    ///
    /// Non-success statuses become [`Error::Server`] carrying the backend's
    /// `detail`; an `error` field in a success body becomes
    /// [`Error::Backend`].
    pub async fn generate(&self, module: Module) -> Result<ScenarioResponse> {
        let url = self.endpoint(GENERATE_PATH);
        debug!(%url, module = module.name(), "requesting scenario");

        let response = self
            .http
            .post(&url)
            .json(&ScenarioRequest {
                module: module.name().to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail_text())
                .unwrap_or_else(|| format!("Server error: {}", status.as_u16()));
            warn!(status = status.as_u16(), %message, "scenario request failed");
            return Err(Error::Server {
                status: status.as_u16(),
                message,
            });
        }

        let data: ScenarioResponse = response.json().await?;
        if let Some(error) = data.error_message() {
            warn!(%error, "backend reported an error");
            return Err(Error::Backend(error.to_string()));
        }

        debug!(module = ?data.module_name, "scenario received");
        Ok(data)
    }

    /// Query the backend's health endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.http.get(self.endpoint(HEALTH_PATH)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Server {
                status: status.as_u16(),
                message: format!("Server error: {}", status.as_u16()),
            });
        }
        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ScenarioClient::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.endpoint(GENERATE_PATH),
            "http://localhost:8000/api/generate-scenario"
        );
    }
}
