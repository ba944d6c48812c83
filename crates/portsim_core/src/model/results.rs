//! Projection results
//!
//! Only reduced statistics survive a projection run; individual simulated paths
//! are discarded once their balances have been merged into the yearly samples.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Portfolio value band for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentilePoint {
    pub year: usize,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Value at a single percentile for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: usize,
    pub value: f64,
}

/// Values at one percentile across years 0..N
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PercentileSeries {
    /// Percentile in [0, 100]
    pub percentile: f64,
    pub points: Vec<SeriesPoint>,
}

/// Per-asset median balance for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MedianPoint {
    pub year: usize,
    pub median: f64,
}

/// Results from a Monte Carlo projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// P10/P50/P90 of the portfolio total for every year, rounded to cents
    pub portfolio_percentiles: Vec<PercentilePoint>,
    /// Median balance per asset from the diagnostic sub-sample, rounded to cents
    pub per_asset_medians: BTreeMap<String, Vec<MedianPoint>>,
    pub simulations_used: usize,
    /// Base seed the trials were derived from (None when a caller RNG was used)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl ProjectionResult {
    /// Band at the end of the horizon
    #[must_use]
    pub fn final_band(&self) -> Option<&PercentilePoint> {
        self.portfolio_percentiles.last()
    }

    #[must_use]
    pub fn median_series(&self, asset: &str) -> Option<&[MedianPoint]> {
        self.per_asset_medians.get(asset).map(Vec::as_slice)
    }

    #[must_use]
    pub fn years(&self) -> usize {
        self.portfolio_percentiles.len().saturating_sub(1)
    }
}

/// Outcome of the deterministic years-to-target search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetProjection {
    /// First year the inflation-adjusted balance met the target (None = not within horizon)
    pub year: Option<usize>,
    /// Inflation-adjusted balance at `year`, or at the last year searched
    pub real_balance: f64,
}

impl TargetProjection {
    #[must_use]
    pub fn reached(&self) -> bool {
        self.year.is_some()
    }
}
