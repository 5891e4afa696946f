// src/services/etherscan.rs
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::services::formatter::{format_price_btc, format_price_usd, format_supply};

const STATS_MODULE: &str = "stats";
const SUCCESS_STATUS: &str = "1";

#[derive(Debug, Deserialize)]
struct EtherscanEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    result: Value,
}

/// Blockchain-stats client. Holds no per-request state; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct EtherscanClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl EtherscanClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
        }
    }

    /// GETs `module=stats&action=<action>` and returns the payload's `result`.
    pub async fn fetch_chain_stat(&self, action: &str) -> Result<Value, AppError> {
        let mut params = vec![("module", STATS_MODULE), ("action", action)];
        if let Some(key) = self.api_key.as_deref() {
            params.push(("apikey", key));
        }

        tracing::debug!(action, "querying etherscan");

        let envelope: EtherscanEnvelope = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(request_failed)?
            .json()
            .await
            .map_err(request_failed)?;

        if envelope.status.as_deref() != Some(SUCCESS_STATUS) {
            tracing::debug!(action, status = ?envelope.status, "etherscan reported failure");
            return Err(AppError::UpstreamRejected(
                "Error retrieving data from Etherscan".to_string(),
            ));
        }

        Ok(envelope.result)
    }
}

fn request_failed(err: reqwest::Error) -> AppError {
    AppError::UpstreamUnavailable(format!("Request failed: {err}"))
}

pub async fn get_supply(client: &EtherscanClient) -> Result<Option<String>, AppError> {
    let supply = client.fetch_chain_stat("ethsupply").await?;
    Ok(format_supply(Some(&supply)))
}

pub async fn get_price_usd(client: &EtherscanClient) -> Result<Option<String>, AppError> {
    let price = client.fetch_chain_stat("ethprice").await?;
    Ok(format_price_usd(price.get("ethusd")))
}

pub async fn get_price_btc(client: &EtherscanClient) -> Result<Option<String>, AppError> {
    let price = client.fetch_chain_stat("ethprice").await?;
    Ok(format_price_btc(price.get("ethbtc")))
}
