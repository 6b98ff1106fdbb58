// file: src/heroku/client.rs
// version: 1.0.0
// guid: b79904ca-2193-4194-95e1-fddbf70f6cb4

//! Heroku Platform API v3 client

use super::types::{ApiErrorBody, App, Formation, FormationUpdate};
use crate::config::Settings;
use crate::error::HerokronError;
use crate::Result;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const ACCEPT_HEADER: &str = "application/vnd.heroku+json; version=3";

/// Client bound to a single API key
pub struct HerokuClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HerokuClient {
    /// Create a client for `api_key` using the shared settings
    pub fn new(api_key: impl Into<String>, settings: &Settings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_url.clone(),
            api_key: api_key.into(),
        })
    }

    /// List every app the key can access
    pub async fn list_apps(&self) -> Result<Vec<App>> {
        let url = self.endpoint(&["apps"])?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", ACCEPT_HEADER)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Names of every app the key can access
    pub async fn app_names(&self) -> Result<Vec<String>> {
        Ok(self
            .list_apps()
            .await?
            .into_iter()
            .map(|app| app.name)
            .collect())
    }

    /// Current formation of one process type
    pub async fn formation(&self, app: &str, process_type: &str) -> Result<Formation> {
        let url = self.endpoint(&["apps", app, "formation", process_type])?;
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", ACCEPT_HEADER)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Scale one process type to `quantity` dynos
    pub async fn scale(&self, app: &str, process_type: &str, quantity: u32) -> Result<Formation> {
        let url = self.endpoint(&["apps", app, "formation", process_type])?;
        debug!("PATCH {} quantity={}", url, quantity);

        let response = self
            .client
            .patch(url)
            .header("Accept", ACCEPT_HEADER)
            .bearer_auth(&self.api_key)
            .json(&FormationUpdate { quantity })
            .send()
            .await?;

        Self::parse_response(response).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HerokronError::config(format!("API URL {} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn parse_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Self::status_error(status, &body))
    }

    fn status_error(status: StatusCode, body: &str) -> HerokronError {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected response")
                    .to_string()
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                HerokronError::invalid_api_key(message)
            }
            StatusCode::NOT_FOUND => HerokronError::not_found(message),
            _ => HerokronError::api(status.as_u16(), message),
        }
    }
}
