use std::{env::var, path::PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use stock::{BASE_API, QueryRequest};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Api root, `https://api.stockvider.com/data` unless overridden.
    pub base_api: String,
    pub exchange: String,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub indicator: String,
    /// Sent as the `api_key` query parameter when set.
    pub api_key: Option<String>,
    /// Where the rendered PNG goes.
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_api: BASE_API.to_string(),
            exchange: "NASDAQ".to_string(),
            symbol: "MSFT".to_string(),
            start_date: NaiveDate::from_ymd_opt(2014, 5, 1).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2016, 5, 2).unwrap_or_default(),
            indicator: "EOD".to_string(),
            api_key: None,
            output: PathBuf::from("MSFT_eod.png"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| var(key).ok())
    }

    /// Overlay `STOCKVIDER_*` values on top of the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_api) = lookup("STOCKVIDER_API_URL") {
            config.base_api = base_api;
        }
        if let Some(exchange) = lookup("STOCKVIDER_EXCHANGE") {
            config.exchange = exchange;
        }
        if let Some(symbol) = lookup("STOCKVIDER_SYMBOL") {
            config.output = PathBuf::from(format!("{}_eod.png", symbol.to_uppercase()));
            config.symbol = symbol;
        }
        if let Some(start) = lookup("STOCKVIDER_START_DATE") {
            config.start_date = parse_date("STOCKVIDER_START_DATE", &start)?;
        }
        if let Some(end) = lookup("STOCKVIDER_END_DATE") {
            config.end_date = parse_date("STOCKVIDER_END_DATE", &end)?;
        }
        if let Some(indicator) = lookup("STOCKVIDER_INDICATOR") {
            config.indicator = indicator;
        }
        config.api_key = lookup("STOCKVIDER_API_KEY").filter(|k| !k.is_empty());
        if let Some(output) = lookup("STOCKVIDER_OUTPUT") {
            config.output = PathBuf::from(output);
        }

        Ok(config)
    }

    pub fn request(&self) -> QueryRequest {
        let request = QueryRequest::new(
            &self.exchange,
            &self.symbol,
            self.start_date,
            self.end_date,
            &self.indicator,
        );

        match &self.api_key {
            Some(key) => request.param("api_key", key),
            None => request,
        }
    }
}

fn parse_date(key: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("{key} must be YYYY-MM-DD, got {value:?}"))
}
