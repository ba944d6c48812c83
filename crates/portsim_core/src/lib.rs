//! Stochastic portfolio projection library
//!
//! This crate projects the long-run value of a multi-asset portfolio under random
//! annual returns. It provides:
//! - Per-asset random-walk path simulation with an injectable random source
//! - Percentile bands (P10/P50/P90) over many simulated paths, per year
//! - Per-asset median series from a smaller diagnostic sub-sample
//! - A deterministic years-to-target search under inflation deflation
//! - A savings-plan analysis combining both projections for a user profile
//!
//! # Builder DSL
//!
//! ```ignore
//! use portsim_core::config::ProjectionBuilder;
//! use portsim_core::model::AssetCatalog;
//! use portsim_core::simulation::project;
//!
//! let catalog = AssetCatalog::representative();
//! let (plan, config) = ProjectionBuilder::new()
//!     .investable_balance(100_000.0)
//!     .annual_contribution(12_000.0)
//!     .weight("BONDS", 0.4)
//!     .weight("DOM_EQUITY", 0.6)
//!     .years(30)
//!     .simulations(2_000)
//!     .seed(42)
//!     .build();
//!
//! let result = project(&plan, &catalog, &config, None)?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod error;
pub mod path;
pub mod percentile;
pub mod planning;
pub mod projector;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{PortfolioPlan, ProjectionBuilder, ProjectionConfig};
pub use error::{LookupError, ProjectionError};
