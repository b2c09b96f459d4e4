use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};

pub const DEFAULT_TICKER: &str = "AAPL";
pub const DEFAULT_CHART_TYPE: &str = "Line";

pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default()
}

/// Parameters as the user submitted them. Anything left out gets a default,
/// and a cleared date field counts as left out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InputParams {
    pub ticker: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end: Option<NaiveDate>,
    pub chart_type: Option<String>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

/// The four inputs one dashboard render works from.
///
/// Only the ticker is normalized. `start <= end` is left to the data provider
/// and the chart type stays a raw string until the chart builder parses it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inputs {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub chart_type: String,
}

impl InputParams {
    pub fn collect(self, today: NaiveDate) -> Inputs {
        let ticker = self
            .ticker
            .map(|t| t.trim().to_uppercase())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| DEFAULT_TICKER.to_string());

        Inputs {
            ticker,
            start: self.start.unwrap_or_else(default_start),
            end: self.end.unwrap_or(today),
            chart_type: self
                .chart_type
                .unwrap_or_else(|| DEFAULT_CHART_TYPE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn collect_pass_defaults() {
        let inputs = InputParams::default().collect(today());
        assert_eq!(inputs.ticker, "AAPL");
        assert_eq!(inputs.start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(inputs.end, today());
        assert_eq!(inputs.chart_type, "Line");
    }

    #[test]
    fn collect_pass_uppercases_ticker() {
        let params = InputParams {
            ticker: Some(" msft ".to_string()),
            ..Default::default()
        };
        assert_eq!(params.collect(today()).ticker, "MSFT");
    }

    #[test]
    fn collect_pass_blank_ticker_falls_back() {
        let params = InputParams {
            ticker: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(params.collect(today()).ticker, "AAPL");
    }

    #[test]
    fn collect_pass_keeps_chart_type_verbatim() {
        let params = InputParams {
            chart_type: Some("Foo".to_string()),
            ..Default::default()
        };
        assert_eq!(params.collect(today()).chart_type, "Foo");
    }

    #[test]
    fn params_pass_blank_dates_take_defaults() {
        let params: InputParams =
            serde_json::from_str(r#"{"ticker": "AAPL", "start": "", "end": " "}"#).unwrap();
        assert_eq!(params.start, None);
        assert_eq!(params.end, None);

        let inputs = params.collect(today());
        assert_eq!(inputs.start, NaiveDate::from_ymd_opt(2022, 1, 1).unwrap());
        assert_eq!(inputs.end, today());
    }

    #[test]
    fn params_pass_missing_and_filled_dates() {
        let params: InputParams = serde_json::from_str(r#"{"end": "2022-03-01"}"#).unwrap();
        assert_eq!(params.start, None);
        assert_eq!(params.end, NaiveDate::from_ymd_opt(2022, 3, 1));
    }

    #[test]
    fn params_fail_malformed_date() {
        let result = serde_json::from_str::<InputParams>(r#"{"start": "01/01/2022"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn collect_pass_does_not_reorder_dates() {
        let start = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let params = InputParams {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        };
        let inputs = params.collect(today());
        assert_eq!((inputs.start, inputs.end), (start, end));
    }
}
