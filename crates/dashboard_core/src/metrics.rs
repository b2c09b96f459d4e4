//! Trailing simple moving averages over the close price.

use chrono::NaiveDate;
use price_model::{PriceRow, PriceSeries, SeriesKey};
use serde::Serialize;

pub const SHORT_WINDOW: usize = 20;
pub const LONG_WINDOW: usize = 50;

/// A price row with its moving averages. `None` until the window is full.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentedRow {
    #[serde(flatten)]
    pub row: PriceRow,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
}

/// Preview row of the augmented table: date, close and both averages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageRow {
    pub date: NaiveDate,
    pub close: f64,
    pub ma20: Option<f64>,
    pub ma50: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AugmentedSeries {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    rows: Vec<AugmentedRow>,
}

impl AugmentedSeries {
    pub fn rows(&self) -> &[AugmentedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The price series the averages were computed from.
    pub fn base(&self) -> PriceSeries {
        PriceSeries::new(
            SeriesKey::new(&self.ticker, self.start, self.end),
            self.rows.iter().map(|r| r.row.clone()).collect(),
        )
    }

    pub fn tail(&self, n: usize) -> Vec<MovingAverageRow> {
        self.rows[self.rows.len().saturating_sub(n)..]
            .iter()
            .map(|r| MovingAverageRow {
                date: r.row.date,
                close: r.row.close,
                ma20: r.ma20,
                ma50: r.ma50,
            })
            .collect()
    }
}

/// Appends MA20 and MA50 of the close price to every row.
pub fn augment(series: &PriceSeries) -> AugmentedSeries {
    let closes = series.closes();
    let ma20 = simple_moving_average(&closes, SHORT_WINDOW);
    let ma50 = simple_moving_average(&closes, LONG_WINDOW);

    let rows = series
        .rows()
        .iter()
        .zip(ma20)
        .zip(ma50)
        .map(|((row, ma20), ma50)| AugmentedRow {
            row: row.clone(),
            ma20,
            ma50,
        })
        .collect();

    AugmentedSeries {
        ticker: series.ticker.clone(),
        start: series.start,
        end: series.end,
        rows,
    }
}

/// Mean of each trailing `window` of `values`, aligned to the last element
/// of the window. The first `window - 1` positions have no value.
pub fn simple_moving_average(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut averages = vec![None; values.len().min(window - 1)];
    averages.extend(
        values
            .windows(window)
            .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
    );
    averages
}
