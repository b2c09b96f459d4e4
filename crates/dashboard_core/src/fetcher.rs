use chrono::NaiveDate;
use log::debug;
use price_model::{FetchError, PriceProvider, PriceSeries, SeriesKey};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Fetches price history through a [`PriceProvider`] and memoizes every
/// successful result by its exact `(ticker, start, end)` key.
///
/// Entries are never replaced once inserted, so a repeated request always
/// gets back the very same series. Nothing is evicted either: the cache lives
/// as long as the fetcher and grows with every distinct key.
pub struct PriceFetcher {
    provider: Box<dyn PriceProvider>,
    cache: Mutex<HashMap<SeriesKey, Arc<PriceSeries>>>,
}

impl PriceFetcher {
    pub fn new(provider: Box<dyn PriceProvider>) -> Self {
        PriceFetcher {
            provider,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Arc<PriceSeries>, FetchError> {
        let key = SeriesKey::new(ticker, start, end);

        let cached = self.lock().get(&key).cloned();
        if let Some(series) = cached {
            debug!("fetch | cache hit | key: {:?}", key);
            return Ok(series);
        }

        debug!("fetch | cache miss | key: {:?}", key);

        let series = Arc::new(self.provider.fetch(&key).await?);
        let cached = self.lock().entry(key).or_insert(series).clone();
        Ok(cached)
    }

    pub fn cached_len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SeriesKey, Arc<PriceSeries>>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
