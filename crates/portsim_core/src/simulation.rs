//! Monte Carlo aggregation over many simulated paths
//!
//! Trials are split into fixed-size batches. Each batch owns an RNG seeded from the
//! base seed and its batch index, so the same seed reproduces bit-identical results
//! whether batches run on one thread or many. Batch samples are merged in batch
//! order before the per-year sort.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::config::{PortfolioPlan, ProjectionConfig};
use crate::error::ProjectionError;
use crate::model::{
    AssetCatalog, MedianPoint, PercentilePoint, ProjectionProgress, ProjectionResult,
};
use crate::path::{PathSimulator, SimulationPath};
use crate::percentile::{YearlySamples, round_to_cents};

const TRIALS_PER_BATCH: usize = 100;

/// Seed stream for the portfolio band trials
const PORTFOLIO_STREAM: u64 = 0;
/// Seed stream for the per-asset median sub-sample
const ASSET_STREAM: u64 = 1;

/// Minimum number of trials behind the per-asset medians
pub const MIN_ASSET_TRIALS: usize = 100;

/// Trials used for per-asset medians: `max(100, floor(5% of simulations))`, or zero
/// when no simulations were requested.
#[must_use]
pub fn asset_trial_count(simulations: usize) -> usize {
    if simulations == 0 {
        0
    } else {
        MIN_ASSET_TRIALS.max(simulations / 20)
    }
}

/// Receives every simulated path of a batch
trait Accumulator: Send + Sized {
    fn record(&mut self, path: &SimulationPath);
    fn merge(&mut self, other: Self);
}

/// Portfolio totals (sum over assets) per year
struct PortfolioSamples(YearlySamples);

impl Accumulator for PortfolioSamples {
    fn record(&mut self, path: &SimulationPath) {
        for year in 0..=path.years() {
            self.0.push(year, path.portfolio_total(year));
        }
    }

    fn merge(&mut self, other: Self) {
        self.0.merge(other.0);
    }
}

/// Each asset's own balance per year
struct AssetSamples(Vec<YearlySamples>);

impl Accumulator for AssetSamples {
    fn record(&mut self, path: &SimulationPath) {
        for (asset, samples) in self.0.iter_mut().enumerate() {
            for (year, balance) in path.asset_series(asset).iter().enumerate() {
                samples.push(year, *balance);
            }
        }
    }

    fn merge(&mut self, other: Self) {
        for (samples, other_samples) in self.0.iter_mut().zip(other.0) {
            samples.merge(other_samples);
        }
    }
}

/// Run a Monte Carlo projection with a seeded, batched random source.
///
/// When `config.seed` is None a base seed is drawn from the thread RNG and reported
/// in the result. Cancellation through `progress` is all-or-nothing.
pub fn project(
    plan: &PortfolioPlan,
    catalog: &AssetCatalog,
    config: &ProjectionConfig,
    progress: Option<&ProjectionProgress>,
) -> Result<ProjectionResult, ProjectionError> {
    let simulator = PathSimulator::new(plan, catalog, config.years)?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().next_u64());
    let asset_trials = asset_trial_count(config.simulations);
    let progress = progress.cloned().unwrap_or_default();
    progress.reset(config.simulations + asset_trials);

    tracing::debug!(
        seed,
        years = config.years,
        simulations = config.simulations,
        asset_trials,
        assets = simulator.num_assets(),
        "Starting portfolio projection"
    );

    if config.simulations == 0 {
        return Ok(degenerate_result(&simulator, Some(seed)));
    }

    let years = simulator.years();
    let num_assets = simulator.num_assets();

    let portfolio = run_batches(
        &simulator,
        config.simulations,
        seed,
        PORTFOLIO_STREAM,
        &progress,
        |trials| PortfolioSamples(YearlySamples::new(years, trials)),
    )?;
    let assets = run_batches(
        &simulator,
        asset_trials,
        seed,
        ASSET_STREAM,
        &progress,
        |trials| AssetSamples(vec![YearlySamples::new(years, trials); num_assets]),
    )?;

    let result = build_result(&simulator, config.simulations, portfolio, assets, Some(seed));
    tracing::debug!(seed, completed = progress.completed(), "Projection finished");
    Ok(result)
}

/// Run a projection drawing every trial sequentially from a caller-supplied RNG.
///
/// `config.seed` is ignored. The portfolio trials are drawn first, then the
/// per-asset sub-sample.
pub fn project_with_rng<R: Rng + ?Sized>(
    plan: &PortfolioPlan,
    catalog: &AssetCatalog,
    config: &ProjectionConfig,
    rng: &mut R,
    progress: Option<&ProjectionProgress>,
) -> Result<ProjectionResult, ProjectionError> {
    let simulator = PathSimulator::new(plan, catalog, config.years)?;
    let asset_trials = asset_trial_count(config.simulations);
    let progress = progress.cloned().unwrap_or_default();
    progress.reset(config.simulations + asset_trials);

    if config.simulations == 0 {
        return Ok(degenerate_result(&simulator, None));
    }

    let years = simulator.years();
    let mut portfolio = PortfolioSamples(YearlySamples::new(years, config.simulations));
    run_trials(&simulator, config.simulations, rng, &progress, &mut portfolio)?;

    let mut assets = AssetSamples(vec![
        YearlySamples::new(years, asset_trials);
        simulator.num_assets()
    ]);
    run_trials(&simulator, asset_trials, rng, &progress, &mut assets)?;

    Ok(build_result(&simulator, config.simulations, portfolio, assets, None))
}

fn run_trials<R: Rng + ?Sized, A: Accumulator>(
    simulator: &PathSimulator,
    trials: usize,
    rng: &mut R,
    progress: &ProjectionProgress,
    accumulator: &mut A,
) -> Result<(), ProjectionError> {
    for _ in 0..trials {
        if progress.is_cancelled() {
            tracing::warn!(
                completed = progress.completed(),
                total = progress.total(),
                "Projection cancelled"
            );
            return Err(ProjectionError::Cancelled);
        }
        let path = simulator.simulate(rng);
        accumulator.record(&path);
        progress.increment();
    }
    Ok(())
}

fn run_batches<A, F>(
    simulator: &PathSimulator,
    trials: usize,
    base_seed: u64,
    stream: u64,
    progress: &ProjectionProgress,
    make: F,
) -> Result<A, ProjectionError>
where
    A: Accumulator,
    F: Fn(usize) -> A + Sync,
{
    let num_batches = trials.div_ceil(TRIALS_PER_BATCH);

    let run_batch = |i: usize| -> Result<A, ProjectionError> {
        let batch_size = if i == num_batches - 1 {
            trials - i * TRIALS_PER_BATCH
        } else {
            TRIALS_PER_BATCH
        };
        let mut rng = SmallRng::seed_from_u64(derive_seed(base_seed, stream, i as u64));
        let mut accumulator = make(batch_size);
        run_trials(simulator, batch_size, &mut rng, progress, &mut accumulator)?;
        Ok(accumulator)
    };

    #[cfg(feature = "parallel")]
    let batches: Vec<A> = (0..num_batches)
        .into_par_iter()
        .map(run_batch)
        .collect::<Result<_, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let batches: Vec<A> = (0..num_batches)
        .map(run_batch)
        .collect::<Result<_, _>>()?;

    let mut merged = make(trials);
    for batch in batches {
        merged.merge(batch);
    }
    Ok(merged)
}

fn build_result(
    simulator: &PathSimulator,
    simulations: usize,
    portfolio: PortfolioSamples,
    assets: AssetSamples,
    seed: Option<u64>,
) -> ProjectionResult {
    let portfolio = portfolio.0.into_sorted();
    let portfolio_percentiles = (0..=simulator.years())
        .map(|year| PercentilePoint {
            year,
            p10: round_to_cents(portfolio.percentile(year, 10.0)),
            p50: round_to_cents(portfolio.percentile(year, 50.0)),
            p90: round_to_cents(portfolio.percentile(year, 90.0)),
        })
        .collect();

    let per_asset_medians = simulator
        .asset_keys()
        .zip(assets.0)
        .map(|(key, samples)| {
            let medians = samples
                .into_sorted()
                .percentile_series(50.0)
                .points
                .into_iter()
                .map(|point| MedianPoint {
                    year: point.year,
                    median: round_to_cents(point.value),
                })
                .collect();
            (key.to_string(), medians)
        })
        .collect();

    ProjectionResult {
        portfolio_percentiles,
        per_asset_medians,
        simulations_used: simulations,
        seed,
    }
}

/// Output for zero trials: only the year-0 point, which needs no randomness
fn degenerate_result(simulator: &PathSimulator, seed: Option<u64>) -> ProjectionResult {
    let initial_total: f64 = simulator.initial_balances().sum();
    let per_asset_medians: BTreeMap<String, Vec<MedianPoint>> = simulator
        .asset_keys()
        .zip(simulator.initial_balances())
        .map(|(key, initial)| {
            (
                key.to_string(),
                vec![MedianPoint {
                    year: 0,
                    median: round_to_cents(initial),
                }],
            )
        })
        .collect();

    ProjectionResult {
        portfolio_percentiles: vec![PercentilePoint {
            year: 0,
            p10: round_to_cents(initial_total),
            p50: round_to_cents(initial_total),
            p90: round_to_cents(initial_total),
        }],
        per_asset_medians,
        simulations_used: 0,
        seed,
    }
}

fn derive_seed(base_seed: u64, stream: u64, batch: u64) -> u64 {
    splitmix64(base_seed ^ splitmix64((stream << 32) ^ batch))
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_trial_count() {
        assert_eq!(asset_trial_count(0), 0);
        assert_eq!(asset_trial_count(10), 100);
        assert_eq!(asset_trial_count(2_000), 100);
        assert_eq!(asset_trial_count(5_000), 250);
        assert_eq!(asset_trial_count(5_019), 250);
    }

    #[test]
    fn test_derive_seed_separates_streams_and_batches() {
        let a = derive_seed(42, PORTFOLIO_STREAM, 0);
        let b = derive_seed(42, PORTFOLIO_STREAM, 1);
        let c = derive_seed(42, ASSET_STREAM, 0);
        let d = derive_seed(43, PORTFOLIO_STREAM, 0);

        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_eq!(a, derive_seed(42, PORTFOLIO_STREAM, 0));
    }
}
