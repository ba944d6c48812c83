//! Asset return models and the catalog of investable assets
//!
//! Assets are a closed, small set known at configuration time. The catalog maps
//! each identifier to a dense `AssetId` so per-trial state can live in flat arrays.

use rand_distr::Normal;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{LookupError, ProjectionError};
use crate::model::AssetId;

/// Static return/volatility parameters for one asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetModel {
    /// Identifier used in allocations (e.g. "BONDS")
    pub key: String,
    #[serde(default)]
    pub label: String,
    /// Mean annual return (0.07 = 7%)
    pub mean: f64,
    /// Standard deviation of the annual return
    pub volatility: f64,
}

impl AssetModel {
    #[must_use]
    pub fn new(key: impl Into<String>, mean: f64, volatility: f64) -> Self {
        Self {
            key: key.into(),
            label: String::new(),
            mean,
            volatility,
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Check that the parameters describe a usable normal distribution
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let reason = if !self.mean.is_finite() {
            Some("mean must be finite")
        } else if !self.volatility.is_finite() || self.volatility < 0.0 {
            Some("volatility must be non-negative and finite")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(self.invalid(reason)),
            None => Ok(()),
        }
    }

    /// Annual return distribution for this asset
    pub fn distribution(&self) -> Result<Normal<f64>, ProjectionError> {
        self.validate()?;
        Normal::new(self.mean, self.volatility)
            .map_err(|_| self.invalid("volatility must be non-negative and finite"))
    }

    fn invalid(&self, reason: &'static str) -> ProjectionError {
        ProjectionError::InvalidDistributionParameters {
            asset: self.key.clone(),
            mean: self.mean,
            volatility: self.volatility,
            reason,
        }
    }
}

/// Ordered set of asset models with an identifier -> index table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<AssetModel>", into = "Vec<AssetModel>")]
pub struct AssetCatalog {
    assets: Vec<AssetModel>,
    index: FxHashMap<String, AssetId>,
}

impl AssetCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Representative asset classes (illustrative long-run assumptions, not fitted data)
    #[must_use]
    pub fn representative() -> Self {
        let mut catalog = Self::new();
        for asset in [
            AssetModel::new("CASH", 0.01, 0.005).label("Cash / Bank Deposit"),
            AssetModel::new("BONDS", 0.035, 0.04).label("Bonds (investment-grade)"),
            AssetModel::new("DOM_EQUITY", 0.07, 0.16).label("Domestic Equity"),
            AssetModel::new("INT_EQUITY", 0.065, 0.15).label("International Equity"),
            AssetModel::new("REITS", 0.05, 0.12).label("REITs / Real Assets"),
        ] {
            catalog.push_unchecked(asset);
        }
        catalog
    }

    /// Add an asset, validating its parameters.
    ///
    /// Re-inserting an existing key replaces its model and keeps its `AssetId`.
    pub fn insert(&mut self, asset: AssetModel) -> Result<AssetId, ProjectionError> {
        asset.validate()?;
        if let Some(&id) = self.index.get(&asset.key) {
            self.assets[id.index()] = asset;
            return Ok(id);
        }
        if self.assets.len() > usize::from(u16::MAX) {
            return Err(ProjectionError::Config(format!(
                "asset catalog is limited to {} entries",
                u16::MAX
            )));
        }
        Ok(self.push_unchecked(asset))
    }

    fn push_unchecked(&mut self, asset: AssetModel) -> AssetId {
        let id = AssetId(self.assets.len() as u16);
        self.index.insert(asset.key.clone(), id);
        self.assets.push(asset);
        id
    }

    pub fn lookup(&self, key: &str) -> Result<AssetId, LookupError> {
        self.index
            .get(key)
            .copied()
            .ok_or_else(|| LookupError::AssetNotFound(key.to_string()))
    }

    pub fn asset(&self, key: &str) -> Result<&AssetModel, LookupError> {
        self.lookup(key).map(|id| &self.assets[id.index()])
    }

    #[must_use]
    pub fn get(&self, id: AssetId) -> Option<&AssetModel> {
        self.assets.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetId, &AssetModel)> {
        self.assets
            .iter()
            .enumerate()
            .map(|(i, asset)| (AssetId(i as u16), asset))
    }
}

impl TryFrom<Vec<AssetModel>> for AssetCatalog {
    type Error = ProjectionError;

    fn try_from(assets: Vec<AssetModel>) -> Result<Self, Self::Error> {
        let mut catalog = Self::new();
        for asset in assets {
            if catalog.index.contains_key(&asset.key) {
                return Err(ProjectionError::Config(format!(
                    "duplicate asset {:?} in catalog",
                    asset.key
                )));
            }
            catalog.insert(asset)?;
        }
        Ok(catalog)
    }
}

impl From<AssetCatalog> for Vec<AssetModel> {
    fn from(catalog: AssetCatalog) -> Self {
        catalog.assets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representative_catalog() {
        let catalog = AssetCatalog::representative();

        assert_eq!(catalog.len(), 5);
        let equity = catalog.asset("DOM_EQUITY").unwrap();
        assert_eq!(equity.mean, 0.07);
        assert_eq!(equity.volatility, 0.16);
        assert_eq!(catalog.lookup("CASH").unwrap(), AssetId(0));
        assert_eq!(catalog.lookup("REITS").unwrap(), AssetId(4));
    }

    #[test]
    fn test_iter_follows_insertion_order() {
        let catalog = AssetCatalog::representative();
        let keys: Vec<&str> = catalog.iter().map(|(_, a)| a.key.as_str()).collect();

        assert_eq!(keys, ["CASH", "BONDS", "DOM_EQUITY", "INT_EQUITY", "REITS"]);
        assert_eq!(catalog.get(AssetId(2)).unwrap().key, "DOM_EQUITY");
        assert!(catalog.get(AssetId(9)).is_none());
    }

    #[test]
    fn test_lookup_missing_asset() {
        let catalog = AssetCatalog::representative();

        assert_eq!(
            catalog.lookup("GOLD"),
            Err(LookupError::AssetNotFound("GOLD".to_string()))
        );
    }

    #[test]
    fn test_insert_rejects_negative_volatility() {
        let mut catalog = AssetCatalog::new();

        let result = catalog.insert(AssetModel::new("BAD", 0.05, -0.1));
        assert!(matches!(
            result,
            Err(ProjectionError::InvalidDistributionParameters { .. })
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_insert_rejects_non_finite_mean() {
        let mut catalog = AssetCatalog::new();
        assert!(catalog.insert(AssetModel::new("NAN", f64::NAN, 0.1)).is_err());
        assert!(catalog.insert(AssetModel::new("INF", 0.05, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_insert_replaces_existing_key() {
        let mut catalog = AssetCatalog::new();
        let first = catalog.insert(AssetModel::new("A", 0.05, 0.1)).unwrap();
        let second = catalog.insert(AssetModel::new("A", 0.06, 0.0)).unwrap();

        assert_eq!(first, second);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.asset("A").unwrap().mean, 0.06);
    }

    #[test]
    fn test_zero_volatility_distribution_is_valid() {
        let asset = AssetModel::new("FLAT", 0.05, 0.0);
        assert!(asset.distribution().is_ok());
    }

    #[test]
    fn test_catalog_deserialize_rejects_duplicates() {
        let json = r#"[
            {"key": "A", "mean": 0.05, "volatility": 0.1},
            {"key": "A", "mean": 0.06, "volatility": 0.1}
        ]"#;

        let result: Result<AssetCatalog, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_serde_preserves_order() {
        let catalog = AssetCatalog::representative();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: AssetCatalog = serde_json::from_str(&json).unwrap();

        let keys: Vec<_> = back.iter().map(|(_, a)| a.key.as_str()).collect();
        assert_eq!(keys, ["CASH", "BONDS", "DOM_EQUITY", "INT_EQUITY", "REITS"]);
    }
}
