use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use price_model::{FetchError, PriceProvider, PriceRow, PriceSeries, SeriesKey};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, month, day).unwrap()
}

/// `count` weekday rows from `from` on, closing at 1.0, 2.0, 3.0, ...
pub fn weekday_rows(from: NaiveDate, count: usize) -> Vec<PriceRow> {
    from.iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(count)
        .enumerate()
        .map(|(i, date)| {
            let close = (i + 1) as f64;
            PriceRow {
                date,
                open: close - 0.5,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000 + i as i64,
            }
        })
        .collect()
}

pub fn series(ticker: &str, count: usize) -> PriceSeries {
    let start = date(1, 1);
    let end = start.checked_add_days(Days::new(90)).unwrap();
    PriceSeries::new(
        SeriesKey::new(ticker, start, end),
        weekday_rows(start, count),
    )
}

#[derive(Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Serves `rows` weekday rows for any key and counts how often it was asked.
pub struct StubProvider {
    rows: usize,
    calls: CallCounter,
}

impl StubProvider {
    pub fn with_rows(rows: usize) -> Self {
        StubProvider {
            rows,
            calls: CallCounter::default(),
        }
    }

    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl PriceProvider for StubProvider {
    async fn fetch(&self, key: &SeriesKey) -> Result<PriceSeries, FetchError> {
        self.calls.bump();
        Ok(PriceSeries::new(
            key.clone(),
            weekday_rows(key.start, self.rows),
        ))
    }
}

#[derive(Default)]
pub struct FailingProvider {
    calls: CallCounter,
}

impl FailingProvider {
    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }
}

#[async_trait]
impl PriceProvider for FailingProvider {
    async fn fetch(&self, _key: &SeriesKey) -> Result<PriceSeries, FetchError> {
        self.calls.bump();
        Err(FetchError::Timeout)
    }
}
