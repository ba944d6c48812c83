//! Integration tests for the portsim projection engine
//!
//! Tests are organized by topic:
//! - `projection` - Percentile bands, per-asset medians and degenerate runs
//! - `reproducibility` - Seeding, caller RNGs and cancellation
//! - `builder_dsl` - Builder DSL for fluent projection setup
//! - `properties` - Property-based checks over random inputs
