use anyhow::{Context, Result};
use eod::config::Config;
use stock::{
    PriceClient,
    chart::EodChart,
    pipeline::{self, Report},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let request = config.request();

    let price_client = PriceClient::new().context("init price client failed")?;
    let renderer = EodChart::default();

    match pipeline::run(&price_client, &renderer, &config.base_api, &request).await? {
        Report::Chart { rows, png } => {
            tokio::fs::write(&config.output, &png)
                .await
                .with_context(|| format!("failed to write {}", config.output.display()))?;
            info!(rows, output = %config.output.display(), "chart saved");
        }
        report @ Report::Rejected { .. } => {
            println!("{report}");
        }
    }

    Ok(())
}
