use std::fmt;

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::{
    chart::ChartRenderer,
    dataset::EodTable,
    price_client::Transport,
    query::QueryRequest,
};

pub const API_RESPONSE_ERROR: &str = "API response error. Check the URL and your credentials.";

/// Outcome of the fetch-and-decode step.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Table(EodTable),
    Rejected { status: u16 },
}

/// Outcome of a whole run.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Chart { rows: usize, png: Vec<u8> },
    Rejected { status: u16 },
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Chart { rows, png } => write!(f, "rendered {rows} rows ({} bytes)", png.len()),
            Report::Rejected { .. } => f.write_str(API_RESPONSE_ERROR),
        }
    }
}

#[instrument(
    name = "fetch_table",
    skip(transport, request),
    fields(exchange = %request.exchange, symbol = %request.symbol, indicator = %request.indicator)
)]
pub async fn fetch_table<T: Transport>(
    transport: &T,
    base_api: &str,
    request: &QueryRequest,
) -> Result<Fetched> {
    let url = request.url_on(base_api);
    debug!(%url, "querying");

    let res = transport.get(&url).await?;
    if !res.is_ok() {
        warn!(status = res.status, "non-success response");
        return Ok(Fetched::Rejected { status: res.status });
    }

    let table = EodTable::from_json(&res.body)?;
    info!(rows = table.len(), "decoded dataset");

    Ok(Fetched::Table(table))
}

/// Fetch, decode and chart one request.
/// The renderer is only reached when the API answered `200`.
pub async fn run<T, R>(
    transport: &T,
    renderer: &R,
    base_api: &str,
    request: &QueryRequest,
) -> Result<Report>
where
    T: Transport,
    R: ChartRenderer + Clone + Send + 'static,
{
    let table = match fetch_table(transport, base_api, request).await? {
        Fetched::Table(table) => table,
        Fetched::Rejected { status } => return Ok(Report::Rejected { status }),
    };

    let rows = table.len();
    let title = format!(
        "{} | {} | {}",
        request.symbol.to_uppercase(),
        request.exchange.to_uppercase(),
        request.indicator
    );
    let renderer = renderer.clone();

    debug!("generating chart (spawn_blocking)");
    let png = tokio::task::spawn_blocking(move || renderer.render(&title, &table))
        .await
        .context("chart task join failed")??;
    info!(bytes = png.len(), "chart generated");

    Ok(Report::Chart { rows, png })
}
