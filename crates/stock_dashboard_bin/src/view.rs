use chrono::NaiveDate;
use dashboard_core::chart::ChartSpec;
use dashboard_core::metrics::MovingAverageRow;
use dashboard_core::pipeline::Dashboard;
use price_model::PriceRow;
use serde::Serialize;

/// JSON body of `/api/dashboard`: both previews, both charts and at most one
/// error message.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub chart_type: String,
    pub row_count: usize,
    pub raw_tail: Vec<PriceRow>,
    pub primary_chart: Option<ChartSpec>,
    pub error: Option<String>,
    pub augmented_tail: Vec<MovingAverageRow>,
    pub moving_average_chart: ChartSpec,
}

impl From<Dashboard> for DashboardView {
    fn from(dashboard: Dashboard) -> Self {
        let (primary_chart, error) = match dashboard.primary {
            Ok(chart) => (Some(chart), None),
            Err(e) => (None, Some(e.to_string())),
        };

        DashboardView {
            ticker: dashboard.inputs.ticker,
            start: dashboard.inputs.start,
            end: dashboard.inputs.end,
            chart_type: dashboard.inputs.chart_type,
            row_count: dashboard.row_count,
            raw_tail: dashboard.raw_tail,
            primary_chart,
            error,
            augmented_tail: dashboard.augmented_tail,
            moving_average_chart: dashboard.overlay,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthcheckResponse {
    pub status: String,
}
