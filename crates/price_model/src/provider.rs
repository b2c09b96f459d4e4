use async_trait::async_trait;
use thiserror::Error;

use crate::{PriceSeries, SeriesKey};

/// A source of daily price history.
///
/// Unknown tickers and empty ranges are not errors: implementations return an
/// empty [`PriceSeries`] for them. Only transport-level problems are reported
/// as [`FetchError`].
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch(&self, key: &SeriesKey) -> Result<PriceSeries, FetchError>;
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to data provider failed: {0}")]
    Http(String),
    #[error("data provider responded with status {0}")]
    Status(u16),
    #[error("could not decode data provider response: {0}")]
    Decode(String),
    #[error("data provider did not respond in time")]
    Timeout,
}
