mod price_client;
mod query;

pub mod chart;
pub mod dataset;
pub mod pipeline;

pub use price_client::{PriceClient, RawResponse, Transport};
pub use query::{BASE_API, QueryRequest, build_query_url, build_query_url_on};
