//! Projection configuration
//!
//! A projection is described by two pieces:
//!
//! **What is invested** (`PortfolioPlan`):
//! - `allocation` - weights per asset identifier
//! - `investable_balance` - capital split across assets at year 0
//! - `annual_contribution` - amount added every year, split by the same weights
//!
//! **How it is simulated** (`ProjectionConfig`):
//! - `years` - horizon
//! - `simulations` - number of Monte Carlo trials
//! - `seed` - base seed for reproducible runs
//!
//! # Builder DSL
//!
//! ```ignore
//! use portsim_core::config::ProjectionBuilder;
//! use portsim_core::model::RiskBucket;
//!
//! let (plan, config) = ProjectionBuilder::new()
//!     .investable_balance(250_000.0)
//!     .annual_contribution(24_000.0)
//!     .risk_bucket(RiskBucket::Aggressive)
//!     .years(40)
//!     .seed(7)
//!     .build();
//! ```

use serde::{Deserialize, Serialize};

use crate::model::AllocationVector;

pub mod builder;

pub use builder::ProjectionBuilder;

/// Default projection horizon in years
pub const DEFAULT_YEARS: usize = 50;
/// Default number of Monte Carlo trials
pub const DEFAULT_SIMULATIONS: usize = 5000;
/// Default annual inflation rate used by the savings analysis
pub const DEFAULT_INFLATION: f64 = 0.02;

fn default_years() -> usize {
    DEFAULT_YEARS
}

fn default_simulations() -> usize {
    DEFAULT_SIMULATIONS
}

/// Capital and allocation being projected
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPlan {
    pub allocation: AllocationVector,
    #[serde(default)]
    pub investable_balance: f64,
    #[serde(default)]
    pub annual_contribution: f64,
}

impl PortfolioPlan {
    #[must_use]
    pub fn new(allocation: AllocationVector, investable_balance: f64, annual_contribution: f64) -> Self {
        Self {
            allocation,
            investable_balance,
            annual_contribution,
        }
    }
}

/// Monte Carlo run settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_years")]
    pub years: usize,
    #[serde(default = "default_simulations")]
    pub simulations: usize,
    /// Base seed; None draws a fresh one from the thread RNG
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            years: DEFAULT_YEARS,
            simulations: DEFAULT_SIMULATIONS,
            seed: None,
        }
    }
}

impl ProjectionConfig {
    #[must_use]
    pub fn with_years(mut self, years: usize) -> Self {
        self.years = years;
        self
    }

    #[must_use]
    pub fn with_simulations(mut self, simulations: usize) -> Self {
        self.simulations = simulations;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
