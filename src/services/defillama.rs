// src/services/defillama.rs
use serde_json::Value;

use crate::error::AppError;
use crate::services::formatter::{format_pool_history, format_pool_list};

/// Yield-aggregator client rooted at the provider's base URL.
#[derive(Debug, Clone)]
pub struct DefiLlamaClient {
    http: reqwest::Client,
    base_url: String,
}

impl DefiLlamaClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// GETs `{base}/{endpoint}` and returns the decoded body untouched.
    /// The `status` field is left to the caller.
    pub async fn fetch_yield_data(&self, endpoint: &str) -> Result<Value, AppError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        tracing::debug!(%url, "querying defillama");

        self.http
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)
    }
}

fn request_failed(err: reqwest::Error) -> AppError {
    AppError::UpstreamUnavailable(format!("Request failed: {err}"))
}

pub async fn get_all_pools(client: &DefiLlamaClient) -> Result<String, AppError> {
    let pools = client.fetch_yield_data("pools").await?;
    format_pool_list(&pools)
}

pub async fn get_pool_info(client: &DefiLlamaClient, pool_id: &str) -> Result<String, AppError> {
    let history = client.fetch_yield_data(&format!("chart/{pool_id}")).await?;
    format_pool_history(&history)
}
