use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use portsim::{OutputFormat, init_logging, load_request, render};
use portsim_core::planning::analyze;

#[derive(Parser, Debug)]
#[command(name = "portsim")]
#[command(about = "Stochastic portfolio projection for a savings plan")]
struct Args {
    /// Request file (YAML) with the savings profile and target amount
    input: PathBuf,

    /// Number of Monte Carlo trials (overrides the request file)
    #[arg(short, long)]
    simulations: Option<usize>,

    /// Projection horizon in years (overrides the request file)
    #[arg(short, long)]
    years: Option<usize>,

    /// Base seed for reproducible runs (overrides the request file)
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let file = load_request(&args.input)?;
    let mut config = file.settings.clone();
    if let Some(simulations) = args.simulations {
        config.simulations = simulations;
    }
    if let Some(years) = args.years {
        config.years = years;
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    let catalog = file.catalog();
    let report = analyze(&file.request(), &catalog, &config, None)
        .wrap_err_with(|| format!("analysis of {} failed", args.input.display()))?;

    tracing::info!(
        years = config.years,
        simulations = report.portfolio.monte_carlo_sims_used,
        seed = ?report.portfolio.monte_carlo.seed,
        readiness = report.profile_summary.readiness,
        "Analysis complete"
    );

    println!("{}", render(&report, args.format)?);
    Ok(())
}
