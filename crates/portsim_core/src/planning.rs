//! Savings-plan analysis
//!
//! Turns a household profile into a projection request: checks the declared
//! contribution against spare cash, sets aside the emergency fund, picks the
//! allocation for the risk bucket, then runs both the Monte Carlo projection and
//! the deterministic years-to-target search.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_INFLATION, PortfolioPlan, ProjectionConfig};
use crate::error::ProjectionError;
use crate::model::{
    AllocationVector, AssetCatalog, ProjectionProgress, ProjectionResult, RiskBucket,
    TargetProjection,
};
use crate::projector::{TargetSearch, years_to_target};
use crate::simulation::project;

pub const DISCLAIMER: &str = "Asset means and volatilities are representative long-run \
assumptions for education only. Projections are not forecasts or investment advice; \
actual returns, fees and taxes will differ.";

fn default_inflation() -> f64 {
    DEFAULT_INFLATION
}

/// Monthly cash flow and savings of a household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsProfile {
    pub monthly_income: f64,
    pub monthly_expense: f64,
    /// Amount the user wants to invest every month
    pub monthly_contribution: f64,
    pub current_savings: f64,
    /// Cash kept aside and not invested (None or 0 = no emergency fund)
    #[serde(default)]
    pub emergency_fund_amount: Option<f64>,
    /// Bucket name; unknown or missing names fall back to moderate
    #[serde(default)]
    pub risk_bucket: Option<String>,
    #[serde(default = "default_inflation")]
    pub inflation_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub profile: SavingsProfile,
    /// Goal in today's money
    pub target_amount: f64,
}

impl AnalysisRequest {
    /// Reject negative amounts, a non-positive target and unusable inflation rates
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let profile = &self.profile;
        let amounts = [
            ("monthly_income", profile.monthly_income),
            ("monthly_expense", profile.monthly_expense),
            ("monthly_contribution", profile.monthly_contribution),
            ("current_savings", profile.current_savings),
            (
                "emergency_fund_amount",
                profile.emergency_fund_amount.unwrap_or(0.0),
            ),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(ProjectionError::Config(format!(
                    "{name} must be a non-negative amount, got {value}"
                )));
            }
        }

        if !self.target_amount.is_finite() || self.target_amount <= 0.0 {
            return Err(ProjectionError::Config(format!(
                "target_amount must be positive, got {}",
                self.target_amount
            )));
        }

        if !profile.inflation_rate.is_finite() || profile.inflation_rate <= -1.0 {
            return Err(ProjectionError::Config(format!(
                "inflation_rate must be greater than -1, got {}",
                profile.inflation_rate
            )));
        }

        Ok(())
    }
}

/// Reason a profile is not ready to invest, or an adjustment made to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadinessNote {
    /// Savings do not cover the emergency fund
    EmergencyShortfall { shortfall: f64 },
    /// Expenses meet or exceed income
    NoSpareCash { spare_cash: f64 },
    /// Declared contribution exceeded spare cash and was lowered
    ContributionReduced {
        declared: f64,
        spare_cash: f64,
        used: f64,
    },
}

impl fmt::Display for ReadinessNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessNote::EmergencyShortfall { shortfall } => write!(
                f,
                "savings do not cover the emergency fund, {shortfall:.2} more is needed"
            ),
            ReadinessNote::NoSpareCash { spare_cash } => write!(
                f,
                "income does not exceed expenses (spare cash {spare_cash:.2}/month), nothing left to invest"
            ),
            ReadinessNote::ContributionReduced {
                declared,
                spare_cash,
                used,
            } => write!(
                f,
                "declared contribution {declared:.2}/month exceeds spare cash {spare_cash:.2}/month, \
                 {used:.2}/month used for this projection"
            ),
        }
    }
}

/// Cash-flow checks derived from a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub monthly_income: f64,
    pub monthly_expense: f64,
    pub monthly_contribution_declared: f64,
    pub monthly_contribution_used: f64,
    pub spare_cash: f64,
    pub current_savings: f64,
    pub emergency_fund_required: Option<f64>,
    pub investable_savings: f64,
    pub emergency_shortfall: f64,
    pub readiness: bool,
    pub readiness_notes: Vec<ReadinessNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    pub risk_bucket: RiskBucket,
    pub allocation: AllocationVector,
    /// Allocation-weighted mean return, rounded to 4 decimals
    pub estimated_annual_return: f64,
    pub deterministic_years_to_target: Option<usize>,
    pub deterministic: TargetProjection,
    pub monte_carlo: ProjectionResult,
    pub monte_carlo_sims_used: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub disclaimer: String,
    pub profile_summary: ProfileSummary,
    pub portfolio: PortfolioAnalysis,
}

/// Apply the budget and emergency-fund rules to a profile
#[must_use]
pub fn summarize_profile(profile: &SavingsProfile) -> ProfileSummary {
    let spare_cash = profile.monthly_income - profile.monthly_expense;
    let declared = profile.monthly_contribution;

    let mut budget_note = None;
    let used = if spare_cash < declared {
        let used = spare_cash.max(0.0);
        budget_note = Some(ReadinessNote::ContributionReduced {
            declared,
            spare_cash,
            used,
        });
        used
    } else {
        declared
    };

    let (investable, shortfall) = match profile.emergency_fund_amount {
        Some(fund) if fund != 0.0 => (
            (profile.current_savings - fund).max(0.0),
            (fund - profile.current_savings).max(0.0),
        ),
        _ => (profile.current_savings, 0.0),
    };

    let mut notes = Vec::new();
    if shortfall > 0.0 {
        notes.push(ReadinessNote::EmergencyShortfall { shortfall });
    }
    if spare_cash <= 0.0 {
        notes.push(ReadinessNote::NoSpareCash { spare_cash });
    }
    let readiness = notes.is_empty();
    notes.extend(budget_note);

    ProfileSummary {
        monthly_income: profile.monthly_income,
        monthly_expense: profile.monthly_expense,
        monthly_contribution_declared: declared,
        monthly_contribution_used: used,
        spare_cash,
        current_savings: profile.current_savings,
        emergency_fund_required: profile.emergency_fund_amount,
        investable_savings: investable,
        emergency_shortfall: shortfall,
        readiness,
        readiness_notes: notes,
    }
}

/// Analyze a savings profile against a target.
///
/// The Monte Carlo projection and the deterministic search share the horizon in
/// `config.years`.
pub fn analyze(
    request: &AnalysisRequest,
    catalog: &AssetCatalog,
    config: &ProjectionConfig,
    progress: Option<&ProjectionProgress>,
) -> Result<AnalysisReport, ProjectionError> {
    request.validate()?;

    let summary = summarize_profile(&request.profile);
    let risk_bucket = RiskBucket::from_name_or_default(request.profile.risk_bucket.as_deref());
    let allocation = risk_bucket.allocation();
    let annual_contribution = summary.monthly_contribution_used * 12.0;
    let expected_return = allocation.expected_return(catalog)?;

    tracing::debug!(
        %risk_bucket,
        investable = summary.investable_savings,
        annual_contribution,
        readiness = summary.readiness,
        "Analyzing savings profile"
    );

    let plan = PortfolioPlan::new(
        allocation.clone(),
        summary.investable_savings,
        annual_contribution,
    );
    let monte_carlo = project(&plan, catalog, config, progress)?;

    let deterministic = years_to_target(&TargetSearch {
        initial_balance: summary.investable_savings,
        annual_contribution,
        expected_return,
        inflation_rate: request.profile.inflation_rate,
        target_present_value: request.target_amount,
        max_years: config.years,
    });

    Ok(AnalysisReport {
        disclaimer: DISCLAIMER.to_string(),
        profile_summary: summary,
        portfolio: PortfolioAnalysis {
            risk_bucket,
            allocation,
            estimated_annual_return: round_to(expected_return, 4),
            deterministic_years_to_target: deterministic.year,
            deterministic,
            monte_carlo_sims_used: monte_carlo.simulations_used,
            monte_carlo,
        },
    })
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> SavingsProfile {
        SavingsProfile {
            monthly_income: 50_000.0,
            monthly_expense: 30_000.0,
            monthly_contribution: 10_000.0,
            current_savings: 100_000.0,
            emergency_fund_amount: Some(60_000.0),
            risk_bucket: None,
            inflation_rate: 0.02,
        }
    }

    #[test]
    fn test_summary_ready_profile() {
        let summary = summarize_profile(&profile());

        assert_eq!(summary.spare_cash, 20_000.0);
        assert_eq!(summary.monthly_contribution_used, 10_000.0);
        assert_eq!(summary.investable_savings, 40_000.0);
        assert_eq!(summary.emergency_shortfall, 0.0);
        assert!(summary.readiness);
        assert!(summary.readiness_notes.is_empty());
    }

    #[test]
    fn test_contribution_reduced_to_spare_cash() {
        let summary = summarize_profile(&SavingsProfile {
            monthly_contribution: 25_000.0,
            ..profile()
        });

        assert_eq!(summary.monthly_contribution_used, 20_000.0);
        // A reduced contribution alone does not block readiness
        assert!(summary.readiness);
        assert_eq!(
            summary.readiness_notes,
            vec![ReadinessNote::ContributionReduced {
                declared: 25_000.0,
                spare_cash: 20_000.0,
                used: 20_000.0,
            }]
        );
    }

    #[test]
    fn test_overspending_and_shortfall_notes_in_order() {
        let summary = summarize_profile(&SavingsProfile {
            monthly_expense: 55_000.0,
            current_savings: 10_000.0,
            ..profile()
        });

        assert_eq!(summary.spare_cash, -5_000.0);
        assert_eq!(summary.monthly_contribution_used, 0.0);
        assert_eq!(summary.investable_savings, 0.0);
        assert_eq!(summary.emergency_shortfall, 50_000.0);
        assert!(!summary.readiness);
        assert!(matches!(
            summary.readiness_notes.as_slice(),
            [
                ReadinessNote::EmergencyShortfall { .. },
                ReadinessNote::NoSpareCash { .. },
                ReadinessNote::ContributionReduced { .. },
            ]
        ));
    }

    #[test]
    fn test_zero_emergency_fund_keeps_all_savings() {
        let summary = summarize_profile(&SavingsProfile {
            emergency_fund_amount: Some(0.0),
            ..profile()
        });

        assert_eq!(summary.investable_savings, 100_000.0);
        assert_eq!(summary.emergency_shortfall, 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let ok = AnalysisRequest {
            profile: profile(),
            target_amount: 1_000_000.0,
        };
        assert!(ok.validate().is_ok());

        let zero_target = AnalysisRequest {
            target_amount: 0.0,
            ..ok.clone()
        };
        assert!(matches!(
            zero_target.validate(),
            Err(ProjectionError::Config(_))
        ));

        let negative_income = AnalysisRequest {
            profile: SavingsProfile {
                monthly_income: -1.0,
                ..profile()
            },
            ..ok.clone()
        };
        assert!(negative_income.validate().is_err());

        let bad_inflation = AnalysisRequest {
            profile: SavingsProfile {
                inflation_rate: -1.0,
                ..profile()
            },
            ..ok
        };
        assert!(bad_inflation.validate().is_err());
    }

    #[test]
    fn test_analyze_moderate_profile() {
        let request = AnalysisRequest {
            profile: SavingsProfile {
                risk_bucket: Some("Unknown".to_string()),
                ..profile()
            },
            target_amount: 1_000_000.0,
        };
        let config = ProjectionConfig::default()
            .with_years(30)
            .with_simulations(200)
            .with_seed(11);

        let report = analyze(&request, &AssetCatalog::representative(), &config, None).unwrap();
        let portfolio = &report.portfolio;

        assert_eq!(portfolio.risk_bucket, RiskBucket::Moderate);
        assert!((portfolio.estimated_annual_return - 0.04825).abs() <= 1e-4);
        assert_eq!(portfolio.monte_carlo_sims_used, 200);
        assert_eq!(portfolio.monte_carlo.portfolio_percentiles.len(), 31);
        assert_eq!(portfolio.monte_carlo.portfolio_percentiles[0].p50, 40_000.0);
        assert_eq!(portfolio.monte_carlo.per_asset_medians.len(), 5);
        assert_eq!(
            portfolio.deterministic_years_to_target,
            portfolio.deterministic.year
        );
        assert!(portfolio.deterministic.reached());
    }

    #[test]
    fn test_analyze_rejects_invalid_request() {
        let request = AnalysisRequest {
            profile: profile(),
            target_amount: -5.0,
        };
        let result = analyze(
            &request,
            &AssetCatalog::representative(),
            &ProjectionConfig::default(),
            None,
        );

        assert!(matches!(result, Err(ProjectionError::Config(_))));
    }

    #[test]
    fn test_profile_defaults_from_json() {
        let json = r#"{
            "monthly_income": 1000.0,
            "monthly_expense": 500.0,
            "monthly_contribution": 100.0,
            "current_savings": 0.0
        }"#;
        let profile: SavingsProfile = serde_json::from_str(json).unwrap();

        assert_eq!(profile.inflation_rate, 0.02);
        assert_eq!(profile.emergency_fund_amount, None);
        assert_eq!(profile.risk_bucket, None);
    }
}
