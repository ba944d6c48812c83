//! Allocation of investable capital across assets

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::model::AssetCatalog;

/// Weighting of investable capital across assets, keyed by asset identifier.
///
/// Weights are expected to be non-negative and sum to 1.0, but this is not enforced:
/// weights summing to less than 1.0 leave the remainder uninvested, and larger sums
/// scale results up proportionally. Iteration follows identifier order, which also
/// fixes the order in which random returns are drawn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationVector {
    weights: BTreeMap<String, f64>,
}

impl AllocationVector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_weight(mut self, asset: impl Into<String>, weight: f64) -> Self {
        self.set(asset, weight);
        self
    }

    pub fn set(&mut self, asset: impl Into<String>, weight: f64) {
        self.weights.insert(asset.into(), weight);
    }

    /// Weight of an asset (0.0 when not allocated)
    #[must_use]
    pub fn weight(&self, asset: &str) -> f64 {
        self.weights.get(asset).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, w)| (k.as_str(), *w))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Weighted average of the allocated assets' mean returns
    pub fn expected_return(&self, catalog: &AssetCatalog) -> Result<f64, LookupError> {
        self.iter().try_fold(0.0, |acc, (key, weight)| {
            Ok(acc + catalog.asset(key)?.mean * weight)
        })
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for AllocationVector {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(k, w)| (k.into(), w)).collect(),
        }
    }
}

/// Risk appetite bucket with a fixed allocation rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBucket {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskBucket {
    pub const ALL: [RiskBucket; 3] = [
        RiskBucket::Conservative,
        RiskBucket::Moderate,
        RiskBucket::Aggressive,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RiskBucket::Conservative => "conservative",
            RiskBucket::Moderate => "moderate",
            RiskBucket::Aggressive => "aggressive",
        }
    }

    /// Parse a bucket name case-insensitively, falling back to `Moderate`
    #[must_use]
    pub fn from_name_or_default(name: Option<&str>) -> Self {
        name.and_then(|n| n.parse().ok()).unwrap_or_default()
    }

    /// Allocation over the representative catalog's assets
    #[must_use]
    pub fn allocation(self) -> AllocationVector {
        let weights: [(&str, f64); 5] = match self {
            RiskBucket::Conservative => [
                ("CASH", 0.30),
                ("BONDS", 0.50),
                ("DOM_EQUITY", 0.10),
                ("INT_EQUITY", 0.05),
                ("REITS", 0.05),
            ],
            RiskBucket::Moderate => [
                ("CASH", 0.10),
                ("BONDS", 0.40),
                ("DOM_EQUITY", 0.30),
                ("INT_EQUITY", 0.15),
                ("REITS", 0.05),
            ],
            RiskBucket::Aggressive => [
                ("CASH", 0.05),
                ("BONDS", 0.20),
                ("DOM_EQUITY", 0.45),
                ("INT_EQUITY", 0.25),
                ("REITS", 0.05),
            ],
        };
        weights.into_iter().collect()
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "conservative" => Ok(RiskBucket::Conservative),
            "moderate" => Ok(RiskBucket::Moderate),
            "aggressive" => Ok(RiskBucket::Aggressive),
            other => Err(format!("unknown risk bucket: {other}")),
        }
    }
}
