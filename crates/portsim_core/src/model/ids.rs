//! Unique identifiers for projection entities

use serde::{Deserialize, Serialize};

/// Dense index of an asset within an `AssetCatalog`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub u16);

impl AssetId {
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}
