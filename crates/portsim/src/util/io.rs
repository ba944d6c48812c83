//! Request file loading

use std::fs;
use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use portsim_core::config::ProjectionConfig;
use portsim_core::model::AssetCatalog;
use portsim_core::planning::{AnalysisRequest, SavingsProfile};
use serde::{Deserialize, Serialize};

/// Contents of a YAML request file.
///
/// `assets` replaces the representative catalog when present; `settings` holds the
/// projection horizon, trial count and seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestFile {
    pub profile: SavingsProfile,
    pub target_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<AssetCatalog>,
    #[serde(default)]
    pub settings: ProjectionConfig,
}

impl RequestFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn request(&self) -> AnalysisRequest {
        AnalysisRequest {
            profile: self.profile.clone(),
            target_amount: self.target_amount,
        }
    }

    /// Catalog for this request, falling back to the representative assets
    pub fn catalog(&self) -> AssetCatalog {
        self.assets
            .clone()
            .unwrap_or_else(AssetCatalog::representative)
    }
}

/// Read and parse a request file
pub fn load_request(path: &Path) -> color_eyre::Result<RequestFile> {
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read request file {}", path.display()))?;
    let request = RequestFile::from_yaml(&content)
        .map_err(|e| eyre!("failed to parse request file {}: {e}", path.display()))?;

    tracing::debug!(
        path = %path.display(),
        custom_assets = request.assets.is_some(),
        "Loaded request file"
    );
    Ok(request)
}
