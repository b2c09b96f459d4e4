use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use itertools::izip;
use log::{debug, warn};
use price_model::{FetchError, PriceProvider, PriceRow, PriceSeries, SeriesKey};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

pub const YAHOO_BASE_API_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

pub struct YahooAPI {
    base_url: String,
    client: reqwest::Client,
}

impl YahooAPI {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let mut reqwest_headers = reqwest::header::HeaderMap::new();
        reqwest_headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(USER_AGENT),
        );

        let client = reqwest::Client::builder()
            .default_headers(reqwest_headers)
            .timeout(timeout)
            .build()
            .map_err(map_reqwest_error)?;

        Ok(YahooAPI {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn chart_url(&self, key: &SeriesKey) -> String {
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url,
            key.ticker,
            midnight_timestamp(key.start),
            midnight_timestamp(key.end)
        )
    }
}

#[async_trait]
impl PriceProvider for YahooAPI {
    async fn fetch(&self, key: &SeriesKey) -> Result<PriceSeries, FetchError> {
        let url = self.chart_url(key);

        debug!("fetch | url: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        // unknown symbols and invalid ranges come back as 404 / 400 with an error body
        if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            debug!("fetch | no data | status: {} | ticker: {}", status, key.ticker);
            return Ok(PriceSeries::empty(key.clone()));
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        parse_chart(key, &body)
    }
}

/// Turns a v8 chart response body into a [`PriceSeries`].
///
/// Rows with any missing price are skipped; a missing volume counts as zero.
pub fn parse_chart(key: &SeriesKey, body: &str) -> Result<PriceSeries, FetchError> {
    let chart_json: YahooChartJSON =
        serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))?;

    if let Some(error) = chart_json.chart.error {
        warn!(
            "parse_chart | provider error | ticker: {} | code: {} | {}",
            key.ticker,
            error.code,
            error.description.unwrap_or_default()
        );
        return Ok(PriceSeries::empty(key.clone()));
    }

    let Some(result) = chart_json
        .chart
        .result
        .and_then(|results| results.into_iter().next())
    else {
        return Ok(PriceSeries::empty(key.clone()));
    };

    let Some(quote) = result.indicators.quote.into_iter().next() else {
        return Ok(PriceSeries::empty(key.clone()));
    };

    let gmtoffset = result.meta.gmtoffset;
    let rows = izip!(
        &result.timestamp,
        &quote.open,
        &quote.high,
        &quote.low,
        &quote.close,
        &quote.volume
    )
    .filter_map(|(t, o, h, l, c, v)| {
        Some(PriceRow {
            date: DateTime::from_timestamp(*t + gmtoffset, 0)?.date_naive(),
            open: (*o)?,
            high: (*h)?,
            low: (*l)?,
            close: (*c)?,
            volume: v.unwrap_or_default().round() as i64,
        })
    })
    .collect();

    Ok(PriceSeries::new(key.clone(), rows))
}

fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartJSON {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartErrorJSON>,
}

#[derive(Debug, Deserialize)]
struct ChartErrorJSON {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Meta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}
