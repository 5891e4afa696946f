// src/state.rs
use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::defillama::DefiLlamaClient;
use crate::services::etherscan::EtherscanClient;
use crate::services::llm::{HuggingFaceGenerator, TextGenerator};

pub type SharedState = Arc<AppState>;

/// Everything here is read-only after startup.
pub struct AppState {
    pub etherscan: EtherscanClient,
    pub defillama: DefiLlamaClient,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(
        etherscan: EtherscanClient,
        defillama: DefiLlamaClient,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            etherscan,
            defillama,
            generator,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let http = reqwest::Client::new();

        Self::new(
            EtherscanClient::new(
                http.clone(),
                config.etherscan_api_url.clone(),
                config.etherscan_api_key.clone(),
            ),
            DefiLlamaClient::new(http.clone(), config.defillama_api_url.clone()),
            Arc::new(HuggingFaceGenerator::new(
                http,
                &config.hf_inference_url,
                config.hf_api_token.clone(),
            )),
        )
    }
}
