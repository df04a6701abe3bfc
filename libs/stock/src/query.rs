use std::fmt::{Display, Write};

use chrono::NaiveDate;

pub const BASE_API: &str = "https://api.stockvider.com/data";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single Stockvider data request.
///
/// Built right before the call and consumed by [`QueryRequest::url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub exchange: String,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub indicator: String,
    pub extra_params: Vec<(String, String)>,
}

impl QueryRequest {
    pub fn new(
        exchange: impl Into<String>,
        symbol: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        indicator: impl Into<String>,
    ) -> Self {
        Self {
            exchange: exchange.into(),
            symbol: symbol.into(),
            start_date,
            end_date,
            indicator: indicator.into(),
            extra_params: Vec::new(),
        }
    }

    /// Append a query parameter (api_key, time_period, ...).
    /// Parameters keep the order they were added in.
    pub fn param(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.extra_params.push((key.into(), value.to_string()));
        self
    }

    pub fn url(&self) -> String {
        self.url_on(BASE_API)
    }

    pub fn url_on(&self, base_api: &str) -> String {
        build_query_url_on(
            base_api,
            &self.exchange,
            &self.symbol,
            self.start_date,
            self.end_date,
            &self.indicator,
            self.extra_params.iter().map(|(k, v)| (k, v)),
        )
    }
}

/// Build the Stockvider query url.
///
/// `https://api.stockvider.com/data/<EXCHANGE>/<SYMBOL>/<indicator>?start_date=..&end_date=..[&key=value]*`
///
/// Exchange and symbol are uppercased, the indicator is kept as is.
/// Nothing is percent-encoded.
pub fn build_query_url<I, K, V>(
    exchange: &str,
    symbol: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    indicator: &str,
    extra_params: I,
) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    build_query_url_on(
        BASE_API,
        exchange,
        symbol,
        start_date,
        end_date,
        indicator,
        extra_params,
    )
}

pub fn build_query_url_on<I, K, V>(
    base_api: &str,
    exchange: &str,
    symbol: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
    indicator: &str,
    extra_params: I,
) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Display,
    V: Display,
{
    let mut url = format!(
        "{}/{}/{}/{}?start_date={}&end_date={}",
        base_api.trim_end_matches('/'),
        exchange.to_uppercase(),
        symbol.to_uppercase(),
        indicator,
        start_date.format(DATE_FORMAT),
        end_date.format(DATE_FORMAT),
    );

    for (key, value) in extra_params {
        // writing into a String cannot fail
        let _ = write!(url, "&{key}={value}");
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_PARAMS: [(&str, &str); 0] = [];

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_msft_eod_url() {
        let url = build_query_url(
            "NASDAQ",
            "MSFT",
            date(2014, 5, 1),
            date(2016, 5, 2),
            "EOD",
            NO_PARAMS,
        );
        assert_eq!(
            url,
            "https://api.stockvider.com/data/NASDAQ/MSFT/EOD?start_date=2014-05-01&end_date=2016-05-02"
        );
    }

    #[test]
    fn test_exchange_and_symbol_uppercased() {
        let lower = build_query_url(
            "nasdaq",
            "msft",
            date(2014, 5, 1),
            date(2016, 5, 2),
            "EOD",
            NO_PARAMS,
        );
        let upper = build_query_url(
            "NASDAQ",
            "MSFT",
            date(2014, 5, 1),
            date(2016, 5, 2),
            "EOD",
            NO_PARAMS,
        );
        assert_eq!(lower, upper);
    }

    #[test]
    fn test_indicator_case_preserved() {
        let upper = build_query_url("NASDAQ", "MSFT", date(2014, 5, 1), date(2016, 5, 2), "EOD", NO_PARAMS);
        let lower = build_query_url("NASDAQ", "MSFT", date(2014, 5, 1), date(2016, 5, 2), "eod", NO_PARAMS);
        assert!(upper.contains("/MSFT/EOD?"));
        assert!(lower.contains("/MSFT/eod?"));
    }

    #[test]
    fn test_dates_zero_padded() {
        let url = build_query_url("NYSE", "IBM", date(2009, 1, 9), date(2010, 12, 31), "EOD", NO_PARAMS);
        assert!(url.ends_with("?start_date=2009-01-09&end_date=2010-12-31"));
    }

    #[test]
    fn test_api_key_appended_after_dates() {
        let url = build_query_url(
            "NASDAQ",
            "MSFT",
            date(2014, 5, 1),
            date(2016, 5, 2),
            "EOD",
            [("api_key", "XYZ")],
        );
        assert_eq!(
            url,
            "https://api.stockvider.com/data/NASDAQ/MSFT/EOD?start_date=2014-05-01&end_date=2016-05-02&api_key=XYZ"
        );
    }

    #[test]
    fn test_extra_params_keep_supplied_order() {
        let request = QueryRequest::new("nasdaq", "aapl", date(2015, 3, 2), date(2015, 6, 30), "SMA")
            .param("time_period", 20)
            .param("api_key", "XYZ");

        assert_eq!(
            request.url(),
            "https://api.stockvider.com/data/NASDAQ/AAPL/SMA?start_date=2015-03-02&end_date=2015-06-30&time_period=20&api_key=XYZ"
        );
    }

    #[test]
    fn test_values_not_encoded() {
        let request = QueryRequest::new("NASDAQ", "MSFT", date(2014, 5, 1), date(2016, 5, 2), "EOD")
            .param("note", "a b&c");
        assert!(request.url().ends_with("&note=a b&c"));
    }

    #[test]
    fn test_url_is_deterministic() {
        let request = QueryRequest::new("NASDAQ", "MSFT", date(2014, 5, 1), date(2016, 5, 2), "EOD")
            .param("api_key", "XYZ");
        assert_eq!(request.url(), request.clone().url());
    }

    #[test]
    fn test_custom_base_trailing_slash() {
        let request = QueryRequest::new("NASDAQ", "MSFT", date(2014, 5, 1), date(2016, 5, 2), "EOD");
        assert_eq!(
            request.url_on("http://127.0.0.1:8080/data/"),
            "http://127.0.0.1:8080/data/NASDAQ/MSFT/EOD?start_date=2014-05-01&end_date=2016-05-02"
        );
    }
}
