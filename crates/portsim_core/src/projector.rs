//! Deterministic years-to-target search
//!
//! Grows the balance at a single fixed expected return, adds the nominal annual
//! contribution each year, and deflates by cumulative inflation to find the first
//! year the real balance meets the target. Nominal contributions under deflation
//! have no simple closed form, so this is a forward search rather than an inversion.

use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_YEARS;
use crate::model::TargetProjection;

fn default_max_years() -> usize {
    DEFAULT_YEARS
}

/// Inputs for the deterministic projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetSearch {
    pub initial_balance: f64,
    pub annual_contribution: f64,
    /// Fixed annual return (typically the allocation-weighted mean)
    pub expected_return: f64,
    pub inflation_rate: f64,
    /// Target in today's money; assumed > 0
    pub target_present_value: f64,
    #[serde(default = "default_max_years")]
    pub max_years: usize,
}

/// Find the earliest year in `0..=max_years` whose inflation-adjusted balance
/// is at least the target.
///
/// Returns `year: None` with the real balance at `max_years` when the target is not
/// reached within the horizon.
#[must_use]
pub fn years_to_target(search: &TargetSearch) -> TargetProjection {
    let growth = 1.0 + search.expected_return;
    let inflation = 1.0 + search.inflation_rate;

    let mut balance = search.initial_balance;
    let mut real_balance = balance;

    for year in 0..=search.max_years {
        // Deflator is `(1 + inflation)^year`, not a running product
        real_balance = balance / inflation.powf(year as f64);
        if real_balance >= search.target_present_value {
            return TargetProjection {
                year: Some(year),
                real_balance,
            };
        }

        balance = balance * growth + search.annual_contribution;
    }

    TargetProjection {
        year: None,
        real_balance,
    }
}
