//! Single-trial path simulation
//!
//! Each asset follows an independent random walk: every year a return is drawn from
//! the asset's normal distribution, applied to the previous balance, and the asset's
//! share of the annual contribution is added. There is no rebalancing and no
//! correlation between assets.

use rand::Rng;
use rand::distr::Distribution;
use rand_distr::Normal;

use crate::config::PortfolioPlan;
use crate::error::ProjectionError;
use crate::model::AssetCatalog;

/// One allocated asset with its share of capital and return distribution
#[derive(Debug, Clone)]
struct Holding {
    key: String,
    initial: f64,
    contribution: f64,
    returns: Normal<f64>,
}

/// Generates full multi-year trajectories for a resolved plan
#[derive(Debug, Clone)]
pub struct PathSimulator {
    holdings: Vec<Holding>,
    years: usize,
}

impl PathSimulator {
    /// Resolve a plan against the catalog.
    ///
    /// Fails if an allocated asset is unknown or has unusable parameters.
    pub fn new(
        plan: &PortfolioPlan,
        catalog: &AssetCatalog,
        years: usize,
    ) -> Result<Self, ProjectionError> {
        let holdings = plan
            .allocation
            .iter()
            .map(|(key, weight)| -> Result<Holding, ProjectionError> {
                let returns = catalog.asset(key)?.distribution()?;
                Ok(Holding {
                    key: key.to_string(),
                    initial: plan.investable_balance * weight,
                    contribution: plan.annual_contribution * weight,
                    returns,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { holdings, years })
    }

    #[must_use]
    pub fn years(&self) -> usize {
        self.years
    }

    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.holdings.len()
    }

    /// Asset identifiers in simulation order
    pub fn asset_keys(&self) -> impl Iterator<Item = &str> {
        self.holdings.iter().map(|h| h.key.as_str())
    }

    /// Year-0 balance of each asset
    pub fn initial_balances(&self) -> impl Iterator<Item = f64> + '_ {
        self.holdings.iter().map(|h| h.initial)
    }

    /// Simulate one trial, drawing every annual return from `rng`
    pub fn simulate<R: Rng + ?Sized>(&self, rng: &mut R) -> SimulationPath {
        let mut path = SimulationPath::new(self.holdings.len(), self.years);

        for (asset, holding) in self.holdings.iter().enumerate() {
            path.set(asset, 0, holding.initial);
        }

        for year in 1..=self.years {
            for (asset, holding) in self.holdings.iter().enumerate() {
                let previous = path.balance(asset, year - 1);
                let annual_return = holding.returns.sample(rng);
                let balance = previous * (1.0 + annual_return) + holding.contribution;
                path.set(asset, year, floor_balance(balance));
            }
        }

        path
    }
}

/// Clamp a balance at zero. NaN is treated as +inf so it sorts above every finite value.
#[inline]
fn floor_balance(balance: f64) -> f64 {
    if balance.is_nan() {
        f64::INFINITY
    } else {
        balance.max(0.0)
    }
}

/// Per-asset, per-year balances for one trial.
///
/// Stored as a dense asset-major matrix with `years + 1` columns (year 0 is the
/// initial allocation).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationPath {
    num_assets: usize,
    years: usize,
    balances: Vec<f64>,
}

impl SimulationPath {
    fn new(num_assets: usize, years: usize) -> Self {
        Self {
            num_assets,
            years,
            balances: vec![0.0; num_assets * (years + 1)],
        }
    }

    #[inline]
    fn set(&mut self, asset: usize, year: usize, value: f64) {
        self.balances[asset * (self.years + 1) + year] = value;
    }

    #[must_use]
    #[inline]
    pub fn balance(&self, asset: usize, year: usize) -> f64 {
        self.balances[asset * (self.years + 1) + year]
    }

    /// Balances of one asset for years 0..=N
    #[must_use]
    pub fn asset_series(&self, asset: usize) -> &[f64] {
        let width = self.years + 1;
        &self.balances[asset * width..(asset + 1) * width]
    }

    /// Sum across assets at one year
    #[must_use]
    pub fn portfolio_total(&self, year: usize) -> f64 {
        (0..self.num_assets)
            .map(|asset| self.balance(asset, year))
            .sum()
    }

    #[must_use]
    pub fn num_assets(&self) -> usize {
        self.num_assets
    }

    #[must_use]
    pub fn years(&self) -> usize {
        self.years
    }
}
