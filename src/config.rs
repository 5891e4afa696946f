// src/config.rs
use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const ETHERSCAN_API_URL: &str = "https://api.etherscan.io/api";
pub const DEFILLAMA_API_URL: &str = "https://yields.llama.fi";
pub const HF_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub etherscan_api_key: Option<String>,
    pub etherscan_api_url: String,
    pub defillama_api_url: String,
    pub hf_inference_url: String,
    pub hf_api_token: Option<String>,
}

impl AppConfig {
    /// Loads `.env.local` and `.env` (if present) before reading the environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::from_filename(".env.local").ok();
        dotenvy::dotenv().ok();

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 127.0.0.1:8000")?;

        Ok(Self {
            bind_addr,
            etherscan_api_key: non_empty_var("ETHERSCAN_API_KEY"),
            etherscan_api_url: non_empty_var("ETHERSCAN_API_URL")
                .unwrap_or_else(|| ETHERSCAN_API_URL.to_string()),
            defillama_api_url: non_empty_var("DEFILLAMA_API_URL")
                .unwrap_or_else(|| DEFILLAMA_API_URL.to_string()),
            hf_inference_url: non_empty_var("HF_INFERENCE_URL")
                .unwrap_or_else(|| HF_INFERENCE_URL.to_string()),
            hf_api_token: non_empty_var("HUGGINGFACEHUB_API_TOKEN"),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
