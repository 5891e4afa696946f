use crate::{
    error::AppError,
    services::{defillama, etherscan, llm::fallback_messages},
    state::AppState,
};

pub const HELP_TEXT: &str = "I can assist you with Ethereum blockchain and DeFi data. Here are some commands you can try:

**Etherscan Commands**:
1. `Get eth supply` - Retrieve the total supply of Ethereum.
2. `Get eth price usd` / `Get eth price btc` - Fetch the current Ethereum price.

**DeFiLlama Commands**:
1. `Get defi pools` - Get information about the first 5 DeFi pools.
2. `Get defi pools id <pool_id>` - Get detailed information about a specific DeFi pool by its ID.

For unknown commands, I will do my best to assist using my built-in language model.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    EthSupply,
    /// `get eth price` without a currency.
    EthPrice,
    EthPriceUsd,
    EthPriceBtc,
    DefiPools,
    DefiPoolHistory(String),
    Unknown(String),
}

enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Pattern {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            Pattern::Exact(text) => lowered == *text,
            Pattern::Prefix(text) => lowered.starts_with(text),
        }
    }
}

// Order matters: first match wins, and the exact `get defi pools` must precede the id prefix.
static COMMAND_TABLE: [(Pattern, fn(&str) -> Command); 7] = [
    (Pattern::Exact("help"), |_| Command::Help),
    (Pattern::Exact("get eth supply"), |_| Command::EthSupply),
    (Pattern::Exact("get eth price"), |_| Command::EthPrice),
    (Pattern::Exact("get eth price usd"), |_| Command::EthPriceUsd),
    (Pattern::Exact("get eth price btc"), |_| Command::EthPriceBtc),
    (Pattern::Exact("get defi pools"), |_| Command::DefiPools),
    (Pattern::Prefix("get defi pools id"), |msg| {
        Command::DefiPoolHistory(last_token(msg).to_string())
    }),
];

/// Matches case-insensitively against the command table; anything unmatched is `Unknown`.
pub fn detect_command(msg: &str) -> Command {
    let lowered = msg.to_lowercase();

    COMMAND_TABLE
        .iter()
        .find(|(pattern, _)| pattern.matches(&lowered))
        .map(|(_, build)| build(msg))
        .unwrap_or_else(|| Command::Unknown(msg.to_string()))
}

fn last_token(msg: &str) -> &str {
    msg.rsplit(' ').next().unwrap_or(msg)
}

pub async fn generate_reply(state: &AppState, user_msg: &str) -> Result<String, AppError> {
    use Command::*;

    let command = detect_command(user_msg);
    tracing::debug!(?command, "routing chat command");

    let reply = match command {
        Help => Some(HELP_TEXT.to_string()),
        EthSupply => etherscan::get_supply(&state.etherscan).await?,
        EthPrice => Some(format!(
            "Please specify the currency you want the price in. You can use {user_msg} usd or {user_msg} btc."
        )),
        EthPriceUsd => etherscan::get_price_usd(&state.etherscan).await?,
        EthPriceBtc => etherscan::get_price_btc(&state.etherscan).await?,
        DefiPools => Some(defillama::get_all_pools(&state.defillama).await?),
        DefiPoolHistory(pool_id) => {
            Some(defillama::get_pool_info(&state.defillama, &pool_id).await?)
        }
        Unknown(text) => Some(state.generator.generate(&fallback_messages(&text)).await?),
    };

    Ok(reply.unwrap_or_else(|| {
        tracing::debug!("upstream returned no data; replying with empty text");
        String::new()
    }))
}
