mod allocation;
mod asset;
mod ids;
mod progress;
mod results;

pub use allocation::{AllocationVector, RiskBucket};
pub use asset::{AssetCatalog, AssetModel};
pub use ids::AssetId;
pub use progress::ProjectionProgress;
pub use results::{
    MedianPoint, PercentilePoint, PercentileSeries, ProjectionResult, SeriesPoint,
    TargetProjection,
};
