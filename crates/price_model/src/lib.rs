use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

mod provider;

pub use provider::{FetchError, PriceProvider};

/// One trading day of price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Identifies one fetch: the exact `(ticker, start, end)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesKey {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SeriesKey {
    pub fn new(ticker: &str, start: NaiveDate, end: NaiveDate) -> Self {
        SeriesKey {
            ticker: ticker.to_string(),
            start,
            end,
        }
    }
}

/// Price history for a single ticker over a single date range.
///
/// Rows are always ascending by date with at most one row per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    rows: Vec<PriceRow>,
}

impl PriceSeries {
    pub fn new(key: SeriesKey, mut rows: Vec<PriceRow>) -> Self {
        // stable sort, so dedup keeps the first row the provider sent for a date
        rows.sort_by_key(|row| row.date);
        rows.dedup_by_key(|row| row.date);

        PriceSeries {
            ticker: key.ticker,
            start: key.start,
            end: key.end,
            rows,
        }
    }

    pub fn empty(key: SeriesKey) -> Self {
        PriceSeries::new(key, Vec::new())
    }

    pub fn key(&self) -> SeriesKey {
        SeriesKey::new(&self.ticker, self.start, self.end)
    }

    pub fn rows(&self) -> &[PriceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.close).collect()
    }

    /// Last `n` rows, or all of them when the series is shorter.
    pub fn tail(&self, n: usize) -> &[PriceRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, day).unwrap()
    }

    fn row(day: u32, close: f64) -> PriceRow {
        PriceRow {
            date: date(day),
            open: close,
            high: close,
            low: close,
            close,
            volume: 100,
        }
    }

    fn key() -> SeriesKey {
        SeriesKey::new("AAPL", date(1), date(31))
    }

    #[test]
    fn new_sorts_rows_by_date() {
        let series = PriceSeries::new(key(), vec![row(5, 3.0), row(3, 1.0), row(4, 2.0)]);
        let dates: Vec<_> = series.rows().iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(3), date(4), date(5)]);
    }

    #[test]
    fn new_drops_duplicate_dates_keeping_first() {
        let series = PriceSeries::new(key(), vec![row(3, 1.0), row(3, 9.0), row(4, 2.0)]);
        assert_eq!(series.len(), 2);
        assert_eq!(series.rows()[0].close, 1.0);
    }

    #[test]
    fn tail_of_short_series_returns_everything() {
        let series = PriceSeries::new(key(), vec![row(3, 1.0), row(4, 2.0)]);
        assert_eq!(series.tail(5).len(), 2);
    }

    #[test]
    fn tail_returns_last_rows() {
        let rows = (3..=12).map(|d| row(d, d as f64)).collect();
        let series = PriceSeries::new(key(), rows);
        let tail = series.tail(5);
        assert_eq!(tail.len(), 5);
        assert_eq!(tail[0].date, date(8));
        assert_eq!(tail[4].date, date(12));
    }

    #[test]
    fn empty_series_has_no_rows() {
        let series = PriceSeries::empty(key());
        assert!(series.is_empty());
        assert!(series.tail(5).is_empty());
        assert_eq!(series.key(), key());
    }

    #[test]
    fn row_serializes_date_as_iso() {
        let json = serde_json::to_value(row(3, 1.5)).unwrap();
        assert_eq!(json["date"], "2022-01-03");
        assert_eq!(json["close"], 1.5);
    }
}
