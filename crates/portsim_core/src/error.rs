use std::fmt;

/// Errors related to resource lookups
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    AssetNotFound(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::AssetNotFound(key) => write!(f, "asset {key:?} not found"),
        }
    }
}

impl std::error::Error for LookupError {}

/// Errors raised while preparing or running a projection
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    InvalidDistributionParameters {
        asset: String,
        mean: f64,
        volatility: f64,
        reason: &'static str,
    },
    Lookup(LookupError),
    /// Projection was cancelled before every trial completed
    Cancelled,
    /// Configuration error
    Config(String),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::InvalidDistributionParameters {
                asset,
                mean,
                volatility,
                reason,
            } => {
                write!(
                    f,
                    "invalid parameters for asset {asset} (mean={mean}, volatility={volatility}): {reason}"
                )
            }
            ProjectionError::Lookup(e) => write!(f, "{e}"),
            ProjectionError::Cancelled => write!(f, "projection cancelled"),
            ProjectionError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ProjectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectionError::Lookup(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LookupError> for ProjectionError {
    fn from(e: LookupError) -> Self {
        ProjectionError::Lookup(e)
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
