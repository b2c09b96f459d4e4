//! Renderer-agnostic chart descriptions built from a price series.

use chrono::NaiveDate;
use price_model::PriceSeries;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::metrics::{AugmentedRow, AugmentedSeries};

pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Price (USD)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartType {
    Line,
    Candlestick,
    #[serde(rename = "OHLC")]
    Ohlc,
}

impl ChartType {
    pub const ALL: [ChartType; 3] = [ChartType::Line, ChartType::Candlestick, ChartType::Ohlc];

    pub fn label(&self) -> &'static str {
        match self {
            ChartType::Line => "Line",
            ChartType::Candlestick => "Candlestick",
            ChartType::Ohlc => "OHLC",
        }
    }

    fn title(&self, ticker: &str) -> String {
        match self {
            ChartType::Line => format!("{} Closing Price Over Time", ticker),
            ChartType::Candlestick => format!("{} Candlestick Chart", ticker),
            ChartType::Ohlc => format!("{} OHLC Chart", ticker),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChartType {
    type Err = UnsupportedChartType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartType::ALL
            .into_iter()
            .find(|chart_type| chart_type.label() == s)
            .ok_or_else(|| UnsupportedChartType(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported chart type selected: {0:?}")]
pub struct UnsupportedChartType(pub String);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartType,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub series: Vec<NamedSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedSeries {
    pub name: String,
    #[serde(flatten)]
    pub points: SeriesPoints,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "style", content = "points", rename_all = "snake_case")]
pub enum SeriesPoints {
    Xy(Vec<XyPoint>),
    Ohlc(Vec<OhlcPoint>),
}

impl SeriesPoints {
    pub fn len(&self) -> usize {
        match self {
            SeriesPoints::Xy(points) => points.len(),
            SeriesPoints::Ohlc(points) => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct XyPoint {
    pub x: NaiveDate,
    pub y: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OhlcPoint {
    pub x: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Builds the primary price chart for a raw chart-type selection.
pub fn build(series: &PriceSeries, chart_type: &str) -> Result<ChartSpec, UnsupportedChartType> {
    Ok(build_chart(series, chart_type.parse()?))
}

pub fn build_chart(series: &PriceSeries, chart_type: ChartType) -> ChartSpec {
    let named = match chart_type {
        ChartType::Line => NamedSeries {
            name: "Close".to_string(),
            points: SeriesPoints::Xy(
                series
                    .rows()
                    .iter()
                    .map(|row| XyPoint {
                        x: row.date,
                        y: Some(row.close),
                    })
                    .collect(),
            ),
        },
        ChartType::Candlestick | ChartType::Ohlc => NamedSeries {
            name: series.ticker.clone(),
            points: SeriesPoints::Ohlc(
                series
                    .rows()
                    .iter()
                    .map(|row| OhlcPoint {
                        x: row.date,
                        open: row.open,
                        high: row.high,
                        low: row.low,
                        close: row.close,
                    })
                    .collect(),
            ),
        },
    };

    ChartSpec {
        kind: chart_type,
        title: chart_type.title(&series.ticker),
        x_axis_title: X_AXIS_TITLE.to_string(),
        y_axis_title: Y_AXIS_TITLE.to_string(),
        series: vec![named],
    }
}

/// Close price with MA20 and MA50 as three line series.
pub fn build_moving_average_overlay(augmented: &AugmentedSeries) -> ChartSpec {
    let line = |name: &str, y: fn(&AugmentedRow) -> Option<f64>| NamedSeries {
        name: name.to_string(),
        points: SeriesPoints::Xy(
            augmented
                .rows()
                .iter()
                .map(|row| XyPoint {
                    x: row.row.date,
                    y: y(row),
                })
                .collect(),
        ),
    };

    ChartSpec {
        kind: ChartType::Line,
        title: format!("{} Closing Price with Moving Averages", augmented.ticker),
        x_axis_title: X_AXIS_TITLE.to_string(),
        y_axis_title: Y_AXIS_TITLE.to_string(),
        series: vec![
            line("Close", |row| Some(row.row.close)),
            line("MA20", |row| row.ma20),
            line("MA50", |row| row.ma50),
        ],
    }
}
