pub mod chatbot;
pub mod defillama;
pub mod etherscan;
pub mod formatter;
pub mod llm;
