use log::{info, warn};
use price_model::{FetchError, PriceRow};

use crate::chart::{self, ChartSpec, UnsupportedChartType};
use crate::fetcher::PriceFetcher;
use crate::inputs::Inputs;
use crate::metrics::{self, MovingAverageRow};

pub const PREVIEW_ROWS: usize = 5;

/// Everything one interaction renders.
///
/// An unsupported chart type only replaces the primary chart; the moving
/// average overlay is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub inputs: Inputs,
    pub row_count: usize,
    pub raw_tail: Vec<PriceRow>,
    pub primary: Result<ChartSpec, UnsupportedChartType>,
    pub augmented_tail: Vec<MovingAverageRow>,
    pub overlay: ChartSpec,
}

/// Runs fetch, chart building and augmentation once, top to bottom.
///
/// A fetch failure stops the run before anything is built.
pub async fn run(fetcher: &PriceFetcher, inputs: Inputs) -> Result<Dashboard, FetchError> {
    info!(
        "Loading data... | ticker: {} | {} - {}",
        inputs.ticker, inputs.start, inputs.end
    );
    let series = fetcher
        .fetch(&inputs.ticker, inputs.start, inputs.end)
        .await?;
    info!("Loading data...done! | rows: {}", series.len());

    let primary = chart::build(&series, &inputs.chart_type);
    if let Err(e) = &primary {
        warn!("run | {}", e);
    }

    let augmented = metrics::augment(&series);

    Ok(Dashboard {
        row_count: series.len(),
        raw_tail: series.tail(PREVIEW_ROWS).to_vec(),
        primary,
        augmented_tail: augmented.tail(PREVIEW_ROWS),
        overlay: chart::build_moving_average_overlay(&augmented),
        inputs,
    })
}
