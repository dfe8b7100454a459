use serde_json::Value;

use crate::edgar::client::{QueryError, QueryParams};

/// Decoded backend payload, or the reason the query failed.
pub type FilingQueryResult = Result<Value, QueryError>;

/// Anything that can answer a filings search.
#[async_trait::async_trait]
pub trait FilingBackend: Send + Sync {
    async fn fetch_filings(&self, params: &QueryParams) -> FilingQueryResult;
}
