use anyhow::Result;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::core::config::FilingsConfig;
use crate::core::types::{FilingBackend, FilingQueryResult};

pub const FETCH_FILINGS_PATH: &str = "/fetch-sec-filings/";

/// Query string of a filings search, with the backend's parameter names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub ticker: String,
    pub report_type: String,
    pub after_date: String,
    pub before_date: String,
    pub include_amends: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_details: Option<bool>,
}

#[derive(Debug, Clone, Error)]
pub enum QueryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for QueryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            QueryError::Timeout
        } else if let Some(status) = e.status() {
            QueryError::Status(status.as_u16())
        } else if e.is_decode() {
            QueryError::Decode(e.to_string())
        } else {
            QueryError::Network(e.to_string())
        }
    }
}

#[derive(Clone, Debug)]
pub struct FilingQueryClient {
    client: Client,
    endpoint: Url,
}

impl FilingQueryClient {
    pub fn new(config: &FilingsConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        let endpoint = config.api_url.join(FETCH_FILINGS_PATH)?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issues one GET per call; nothing is cached or retried.
    pub async fn fetch_filings(&self, params: &QueryParams) -> FilingQueryResult {
        match self.send(params).await {
            Ok(body) => Ok(body),
            Err(e) => {
                error!("Error while fetching SEC filings data: {}", e);
                Err(e)
            }
        }
    }

    /// Collapses every failure to `None` after logging it.
    pub async fn fetch_filings_or_none(&self, params: &QueryParams) -> Option<Value> {
        self.fetch_filings(params).await.ok()
    }

    async fn send(&self, params: &QueryParams) -> Result<Value, QueryError> {
        debug!("Fetching SEC filings from {} with {:?}", self.endpoint, params);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(params)
            .send()
            .await?;

        debug!("Response status: {}", response.status());

        if !response.status().is_success() {
            return Err(QueryError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        debug!("Received content length: {}", body.len());

        serde_json::from_slice(&body).map_err(|e| QueryError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait]
impl FilingBackend for FilingQueryClient {
    async fn fetch_filings(&self, params: &QueryParams) -> FilingQueryResult {
        FilingQueryClient::fetch_filings(self, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(limit: Option<u64>) -> QueryParams {
        QueryParams {
            ticker: "AAPL".to_string(),
            report_type: "10-Q".to_string(),
            after_date: "2023-04-01".to_string(),
            before_date: "2023-06-30".to_string(),
            include_amends: false,
            limit,
            download_details: Some(true),
        }
    }

    #[test]
    fn wire_names_are_snake_case() {
        let value = serde_json::to_value(params(Some(3))).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "after_date",
                "before_date",
                "download_details",
                "include_amends",
                "limit",
                "report_type",
                "ticker",
            ]
        );
    }

    #[test]
    fn absent_limit_is_omitted() {
        let value = serde_json::to_value(params(None)).unwrap();
        assert!(value.get("limit").is_none());
    }

    #[test]
    fn endpoint_sits_on_base_host() {
        let config = FilingsConfig::default()
            .with_api_url(Url::parse("http://filings.local:9000/api/v1/").unwrap());
        let client = FilingQueryClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint().as_str(),
            "http://filings.local:9000/fetch-sec-filings/"
        );
    }
}
