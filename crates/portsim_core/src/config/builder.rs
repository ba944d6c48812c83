//! Projection Builder
//!
//! Fluent construction of a `PortfolioPlan` and its `ProjectionConfig`.
//!
//! # Example
//!
//! ```ignore
//! use portsim_core::config::ProjectionBuilder;
//!
//! let (plan, config) = ProjectionBuilder::new()
//!     .investable_balance(100_000.0)
//!     .monthly_contribution(1_000.0)
//!     .weight("BONDS", 0.4)
//!     .weight("DOM_EQUITY", 0.6)
//!     .years(30)
//!     .simulations(1_000)
//!     .build();
//! ```

use super::{PortfolioPlan, ProjectionConfig};
use crate::model::{AllocationVector, RiskBucket};

/// Builder for a plan and run settings
#[derive(Debug, Clone, Default)]
pub struct ProjectionBuilder {
    plan: PortfolioPlan,
    config: ProjectionConfig,
}

impl ProjectionBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Plan
    // =========================================================================

    #[must_use]
    pub fn investable_balance(mut self, amount: f64) -> Self {
        self.plan.investable_balance = amount;
        self
    }

    #[must_use]
    pub fn annual_contribution(mut self, amount: f64) -> Self {
        self.plan.annual_contribution = amount;
        self
    }

    /// Contribution given per month; stored as twelve times the amount
    #[must_use]
    pub fn monthly_contribution(self, amount: f64) -> Self {
        self.annual_contribution(amount * 12.0)
    }

    #[must_use]
    pub fn weight(mut self, asset: impl Into<String>, weight: f64) -> Self {
        self.plan.allocation.set(asset, weight);
        self
    }

    /// Replace the allocation entirely
    #[must_use]
    pub fn allocation(mut self, allocation: AllocationVector) -> Self {
        self.plan.allocation = allocation;
        self
    }

    #[must_use]
    pub fn risk_bucket(self, bucket: RiskBucket) -> Self {
        self.allocation(bucket.allocation())
    }

    // =========================================================================
    // Run settings
    // =========================================================================

    #[must_use]
    pub fn years(mut self, years: usize) -> Self {
        self.config.years = years;
        self
    }

    #[must_use]
    pub fn simulations(mut self, simulations: usize) -> Self {
        self.config.simulations = simulations;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn build(self) -> (PortfolioPlan, ProjectionConfig) {
        (self.plan, self.config)
    }
}
