//! Report rendering

use std::fmt::Write;

use color_eyre::eyre::{WrapErr, eyre};
use portsim_core::planning::AnalysisReport;

use crate::util::format::{format_amount, format_percentage, format_years};

/// Years between rows of the band table (the final year is always shown)
const TABLE_STEP: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary and band table
    #[default]
    Table,
    Json,
    Yaml,
}

/// Render an analysis report in the requested format
pub fn render(report: &AnalysisReport, format: OutputFormat) -> color_eyre::Result<String> {
    match format {
        OutputFormat::Table => render_table(report).wrap_err("failed to render table"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(report).wrap_err("failed to serialize report as JSON")
        }
        OutputFormat::Yaml => serde_saphyr::to_string(report)
            .map_err(|e| eyre!("failed to serialize report as YAML: {e}")),
    }
}

fn render_table(report: &AnalysisReport) -> Result<String, std::fmt::Error> {
    let summary = &report.profile_summary;
    let portfolio = &report.portfolio;
    let mut out = String::new();

    writeln!(out, "Profile")?;
    writeln!(out, "  Spare cash / month      {:>16}", format_amount(summary.spare_cash))?;
    writeln!(
        out,
        "  Contribution / month    {:>16}",
        format_amount(summary.monthly_contribution_used)
    )?;
    writeln!(
        out,
        "  Investable savings      {:>16}",
        format_amount(summary.investable_savings)
    )?;
    if summary.emergency_shortfall > 0.0 {
        writeln!(
            out,
            "  Emergency shortfall     {:>16}",
            format_amount(summary.emergency_shortfall)
        )?;
    }
    writeln!(
        out,
        "  Ready to invest         {:>16}",
        if summary.readiness { "yes" } else { "no" }
    )?;
    for note in &summary.readiness_notes {
        writeln!(out, "  - {note}")?;
    }

    writeln!(out)?;
    writeln!(out, "Portfolio ({})", portfolio.risk_bucket)?;
    for (asset, weight) in portfolio.allocation.iter() {
        writeln!(out, "  {asset:<22}{:>17}", format_percentage(weight))?;
    }
    writeln!(
        out,
        "  Expected return         {:>16}",
        format_percentage(portfolio.estimated_annual_return)
    )?;
    writeln!(
        out,
        "  Years to target         {:>16}",
        format_years(portfolio.deterministic_years_to_target)
    )?;

    writeln!(out)?;
    writeln!(
        out,
        "Monte Carlo ({} trials)",
        portfolio.monte_carlo_sims_used
    )?;
    writeln!(out, "  {:>4}  {:>18}  {:>18}  {:>18}", "Year", "P10", "P50", "P90")?;
    let last = portfolio.monte_carlo.years();
    for point in portfolio
        .monte_carlo
        .portfolio_percentiles
        .iter()
        .filter(|p| p.year % TABLE_STEP == 0 || p.year == last)
    {
        writeln!(
            out,
            "  {:>4}  {:>18}  {:>18}  {:>18}",
            point.year,
            format_amount(point.p10),
            format_amount(point.p50),
            format_amount(point.p90)
        )?;
    }

    writeln!(out)?;
    write!(out, "{}", report.disclaimer)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use portsim_core::config::ProjectionConfig;
    use portsim_core::model::AssetCatalog;
    use portsim_core::planning::{AnalysisRequest, SavingsProfile, analyze};

    fn report() -> AnalysisReport {
        let request = AnalysisRequest {
            profile: SavingsProfile {
                monthly_income: 4_000.0,
                monthly_expense: 3_000.0,
                monthly_contribution: 1_500.0,
                current_savings: 20_000.0,
                emergency_fund_amount: Some(5_000.0),
                risk_bucket: Some("conservative".to_string()),
                inflation_rate: 0.02,
            },
            target_amount: 250_000.0,
        };
        let config = ProjectionConfig::default()
            .with_years(12)
            .with_simulations(200)
            .with_seed(3);
        analyze(&request, &AssetCatalog::representative(), &config, None).unwrap()
    }

    #[test]
    fn test_table_lists_every_fifth_year_and_the_last() {
        let table = render(&report(), OutputFormat::Table).unwrap();

        assert!(table.contains("Portfolio (conservative)"));
        assert!(table.contains("15,000.00"));
        assert!(table.contains("declared contribution 1500.00/month"));
        let rows: Vec<&str> = table
            .lines()
            .skip_while(|l| !l.contains("P50"))
            .skip(1)
            .take_while(|l| !l.trim().is_empty())
            .collect();
        let years: Vec<usize> = rows
            .iter()
            .filter_map(|l| l.split_whitespace().next()?.parse().ok())
            .collect();
        assert_eq!(years, vec![0, 5, 10, 12]);
    }

    #[test]
    fn test_json_has_report_sections() {
        let json = render(&report(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["portfolio"]["risk_bucket"], "conservative");
        assert_eq!(value["portfolio"]["monte_carlo_sims_used"], 200);
        assert_eq!(
            value["portfolio"]["monte_carlo"]["portfolio_percentiles"]
                .as_array()
                .unwrap()
                .len(),
            13
        );
        assert_eq!(
            value["profile_summary"]["readiness_notes"][0]["kind"],
            "contribution_reduced"
        );
    }

    #[test]
    fn test_yaml_contains_sections() {
        let yaml = render(&report(), OutputFormat::Yaml).unwrap();

        assert!(yaml.contains("profile_summary"));
        assert!(yaml.contains("portfolio_percentiles"));
    }
}
