// src/services/formatter.rs
//! Turns provider payloads into the text replies sent back to the chat client.

use serde_json::Value;

use crate::error::AppError;

pub const POOL_LIST_LIMIT: usize = 5;

const NOT_AVAILABLE: &str = "N/A";

pub fn format_supply(value: Option<&Value>) -> Option<String> {
    truthy_text(value).map(|supply| format!("The total supply of Ethereum is {supply}"))
}

pub fn format_price_usd(value: Option<&Value>) -> Option<String> {
    truthy_text(value).map(|price| format!("The current price of Ethereum is {price} $"))
}

pub fn format_price_btc(value: Option<&Value>) -> Option<String> {
    truthy_text(value).map(|price| format!("The current price of Ethereum is {price} btc"))
}

/// Renders the first [`POOL_LIST_LIMIT`] pools of a `/pools` payload, one per line.
pub fn format_pool_list(payload: &Value) -> Result<String, AppError> {
    let pools = success_data(payload, "Error retrieving data from DeFiLlama")?;

    let mut out = String::from("First 5 Available Pools:\n");
    for pool in pools.iter().take(POOL_LIST_LIMIT) {
        out.push_str(&format!(
            "- Chain: {}, Project: {}, Symbol: {}, TVL: ${}, APY: {:.2}%, Pool ID: {}\n",
            text_field(pool, "chain")?,
            text_field(pool, "project")?,
            text_field(pool, "symbol")?,
            format_usd(number_field(pool, "tvlUsd")?),
            number_field(pool, "apy")?,
            text_field(pool, "pool")?,
        ));
    }

    Ok(out.trim_end().to_string())
}

/// Renders every entry of a `/chart/{id}` payload, oldest first as received.
pub fn format_pool_history(payload: &Value) -> Result<String, AppError> {
    let entries = success_data(payload, "Error retrieving pool data")?;

    let mut out = String::from("Historical Data:\n");
    for entry in entries {
        let apy_base = match entry.get("apyBase").and_then(Value::as_f64) {
            Some(apy) => format!("{apy:.2}"),
            None => NOT_AVAILABLE.to_string(),
        };

        out.push_str(&format!("- Timestamp: {}\n", text_field(entry, "timestamp")?));
        out.push_str(&format!("  TVL (USD): ${}\n", format_usd(number_field(entry, "tvlUsd")?)));
        out.push_str(&format!("  APY: {:.2}%\n", number_field(entry, "apy")?));
        out.push_str(&format!("  APY (Base): {apy_base}%\n"));
        out.push_str(&format!("  APY (Reward): {}%\n", optional_field(entry, "apyReward")));
        out.push_str(&format!("  IL (7d): {}\n", optional_field(entry, "il7d")));
        out.push_str(&format!("  APY (Base 7d): {}%\n", optional_field(entry, "apyBase7d")));
    }

    Ok(out.trim_end().to_string())
}

/// Two decimals with comma thousands separators: `1234567.891` becomes `1,234,567.89`.
pub fn format_usd(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}

/// JSON truthiness: null, false, zero, and empty strings or collections carry no data.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn truthy_text(value: Option<&Value>) -> Option<String> {
    value.filter(|v| is_truthy(v)).map(display_value)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn success_data<'a>(payload: &'a Value, rejection: &str) -> Result<&'a Vec<Value>, AppError> {
    if payload.get("status").and_then(Value::as_str) != Some("success") {
        return Err(AppError::UpstreamRejected(rejection.to_string()));
    }

    payload
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::MalformedUpstreamData("`data` is not a list".to_string()))
}

fn text_field(entry: &Value, key: &str) -> Result<String, AppError> {
    match entry.get(key) {
        Some(Value::Null) => Ok(NOT_AVAILABLE.to_string()),
        Some(value) => Ok(display_value(value)),
        None => Err(AppError::MalformedUpstreamData(format!("missing `{key}`"))),
    }
}

fn number_field(entry: &Value, key: &str) -> Result<f64, AppError> {
    entry
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| AppError::MalformedUpstreamData(format!("`{key}` is not a number")))
}

fn optional_field(entry: &Value, key: &str) -> String {
    match entry.get(key) {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(value) => display_value(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pool(n: usize) -> Value {
        json!({
            "chain": "Ethereum",
            "project": format!("project-{n}"),
            "symbol": "STETH",
            "tvlUsd": 1234567.891,
            "apy": 3.14159,
            "pool": format!("pool-{n}"),
        })
    }

    #[test]
    fn usd_amounts_are_grouped() {
        assert_eq!(format_usd(0.0), "0.00");
        assert_eq!(format_usd(999.999), "1,000.00");
        assert_eq!(format_usd(1234567.891), "1,234,567.89");
        assert_eq!(format_usd(-12345.5), "-12,345.50");
    }

    #[test]
    fn scalar_sentences_skip_falsy_values() {
        assert_eq!(
            format_supply(Some(&json!("120000000"))).as_deref(),
            Some("The total supply of Ethereum is 120000000")
        );
        assert_eq!(
            format_price_usd(Some(&json!("3012.5"))).as_deref(),
            Some("The current price of Ethereum is 3012.5 $")
        );
        assert_eq!(
            format_price_btc(Some(&json!("0.052"))).as_deref(),
            Some("The current price of Ethereum is 0.052 btc")
        );
        assert_eq!(format_supply(None), None);
        assert_eq!(format_supply(Some(&Value::Null)), None);
        assert_eq!(format_price_usd(Some(&json!(""))), None);
        assert_eq!(format_price_btc(Some(&json!(0))), None);
    }

    #[test]
    fn pool_list_is_capped_at_five() {
        let payload = json!({
            "status": "success",
            "data": (0..8).map(pool).collect::<Vec<_>>(),
        });

        let text = format_pool_list(&payload).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "First 5 Available Pools:");
        assert_eq!(lines.len(), 1 + POOL_LIST_LIMIT);
        assert_eq!(
            lines[1],
            "- Chain: Ethereum, Project: project-0, Symbol: STETH, TVL: $1,234,567.89, APY: 3.14%, Pool ID: pool-0"
        );
        assert!(!text.contains("project-5"));
    }

    #[test]
    fn short_pool_list_is_not_an_error() {
        let payload = json!({ "status": "success", "data": [pool(0), pool(1)] });
        let text = format_pool_list(&payload).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("- Chain")).count(), 2);
    }

    #[test]
    fn pool_list_rejects_failed_status() {
        let payload = json!({ "status": "error", "data": [] });
        let err = format_pool_list(&payload).unwrap_err();
        assert!(matches!(err, AppError::UpstreamRejected(_)));
    }

    #[test]
    fn pool_list_missing_field_is_malformed() {
        let payload = json!({ "status": "success", "data": [{ "chain": "Ethereum" }] });
        let err = format_pool_list(&payload).unwrap_err();
        assert!(matches!(err, AppError::MalformedUpstreamData(_)));
    }

    #[test]
    fn history_renders_every_entry_with_placeholders() {
        let payload = json!({
            "status": "success",
            "data": [
                {
                    "timestamp": "2024-01-01T00:00:00.000Z",
                    "tvlUsd": 1500.0,
                    "apy": 4.5,
                    "apyBase": 4.0,
                    "apyReward": 0.5,
                    "il7d": null,
                    "apyBase7d": null
                },
                {
                    "timestamp": "2024-01-02T00:00:00.000Z",
                    "tvlUsd": 2500.25,
                    "apy": 5.0,
                    "apyBase": null,
                    "apyReward": null,
                    "il7d": 0.01,
                    "apyBase7d": 3.9
                }
            ]
        });

        let text = format_pool_history(&payload).unwrap();

        let expected = "Historical Data:\n\
            - Timestamp: 2024-01-01T00:00:00.000Z\n  TVL (USD): $1,500.00\n  APY: 4.50%\n  APY (Base): 4.00%\n  APY (Reward): 0.5%\n  IL (7d): N/A\n  APY (Base 7d): N/A%\n\
            - Timestamp: 2024-01-02T00:00:00.000Z\n  TVL (USD): $2,500.25\n  APY: 5.00%\n  APY (Base): N/A%\n  APY (Reward): N/A%\n  IL (7d): 0.01\n  APY (Base 7d): 3.9%";
        assert_eq!(text, expected);
    }

    #[test]
    fn history_rejects_failed_status() {
        let err = format_pool_history(&json!({ "status": "error" })).unwrap_err();
        assert!(matches!(err, AppError::UpstreamRejected(ref msg) if msg == "Error retrieving pool data"));
    }
}
