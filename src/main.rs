//! welltest - pressure transient interpretation from the command line
//!
//! # Usage
//!
//! ```bash
//! # Write an example config, then edit the [reservoir] section
//! welltest init-config --output welltest.toml
//!
//! # Constant-rate drawdown (rate and boundary from flags or [drawdown])
//! welltest drawdown --data pressure.csv --rate 250 --boundary 17
//!
//! # Multi-rate drawdown
//! welltest multi-rate --data pressure.csv --schedule rates.csv
//!
//! # Constant-pressure test, JSON on stdout
//! welltest --format json constant-pressure --data rates.csv --pwf 3000
//! ```
//!
//! # Environment Variables
//!
//! - `WELLTEST_CONFIG`: Path to the config file (when `--config` is absent)
//! - `RUST_LOG`: Logging level (default: info). Logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::info;

use welltest_analyzer::analysis::{
    analyze_constant_pressure, analyze_constant_rate, analyze_multi_rate, ConstantPressureInput,
    ConstantRateInput, MultiRateInput,
};
use welltest_analyzer::config::{OutputFormat, WellTestConfig};
use welltest_analyzer::loader::{load_schedule, load_series};
use welltest_analyzer::report::AnalysisReport;
use welltest_analyzer::types::MeasurementSeries;

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "welltest")]
#[command(about = "Well-test interpretation: permeability, skin and reservoir size")]
#[command(version)]
struct CliArgs {
    /// Path to the well-test config (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides [output].format)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Decimal places in the text report (overrides [output].precision)
    #[arg(long, global = true)]
    precision: Option<usize>,

    /// Also write chart data (JSON) to this file
    #[arg(long, global = true, value_name = "PATH")]
    plot_data: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    #[command(flatten)]
    Analysis(AnalysisCommand),

    /// Write an example config file
    InitConfig {
        /// Destination path
        #[arg(long, default_value = "welltest.toml")]
        output: PathBuf,
    },
}

/// Subcommands that load data and run an interpretation.
#[derive(clap::Subcommand, Debug)]
enum AnalysisCommand {
    /// Constant-rate drawdown: semilog and Cartesian analysis
    Drawdown {
        /// CSV of time (hr), bottom-hole pressure (psia)
        #[arg(long)]
        data: PathBuf,
        /// Production rate in STB/D (overrides [drawdown].rate_stb_d)
        #[arg(long)]
        rate: Option<f64>,
        /// Last index of the middle-time region (overrides [drawdown].boundary_index)
        #[arg(long)]
        boundary: Option<usize>,
    },

    /// Multi-rate drawdown: superposition analysis
    MultiRate {
        /// CSV of time (hr), bottom-hole pressure (psia)
        #[arg(long)]
        data: PathBuf,
        /// CSV of time_change (hr), rate (STB/D)
        #[arg(long)]
        schedule: PathBuf,
    },

    /// Constant-pressure test: reciprocal-rate analysis
    ConstantPressure {
        /// CSV of time (hr), rate (STB/D)
        #[arg(long)]
        data: PathBuf,
        /// Flowing bottom-hole pressure in psia (overrides [constant_pressure])
        #[arg(long)]
        pwf: Option<f64>,
    },
}

// ============================================================================
// Commands
// ============================================================================

fn load_data(path: &Path) -> Result<MeasurementSeries> {
    load_series(path).with_context(|| format!("Failed to load data from {}", path.display()))
}

fn run_analysis(
    command: AnalysisCommand,
    config: &WellTestConfig,
) -> Result<(AnalysisReport, MeasurementSeries)> {
    let properties = config.reservoir.to_properties();

    match command {
        AnalysisCommand::Drawdown { data, rate, boundary } => {
            let section = config.drawdown.unwrap_or_default();
            let rate = rate
                .or(section.rate_stb_d)
                .ok_or_else(|| anyhow!("No rate given: pass --rate or set [drawdown].rate_stb_d"))?;
            let boundary_index = boundary.or(section.boundary_index).ok_or_else(|| {
                anyhow!("No boundary given: pass --boundary or set [drawdown].boundary_index")
            })?;
            let series = load_data(&data)?;
            let analysis = analyze_constant_rate(&ConstantRateInput {
                series: &series,
                rate,
                properties: &properties,
                boundary_index,
            })
            .context("Constant-rate analysis failed")?;
            info!(
                k_md = analysis.permeability_md,
                skin = analysis.skin,
                re_ft = analysis.reservoir_radius_ft,
                "Drawdown analysis complete"
            );
            Ok((analysis.into(), series))
        }
        AnalysisCommand::MultiRate { data, schedule } => {
            let series = load_data(&data)?;
            let schedule = load_schedule(&schedule)
                .with_context(|| format!("Failed to load schedule from {}", schedule.display()))?;
            let analysis = analyze_multi_rate(&MultiRateInput {
                series: &series,
                schedule: &schedule,
                properties: &properties,
            })
            .context("Multi-rate analysis failed")?;
            info!(
                k_md = analysis.permeability_md,
                skin = analysis.skin,
                "Multi-rate analysis complete"
            );
            Ok((analysis.into(), series))
        }
        AnalysisCommand::ConstantPressure { data, pwf } => {
            let flowing_pressure = pwf
                .or_else(|| config.constant_pressure.and_then(|c| c.flowing_pressure_psia))
                .ok_or_else(|| {
                    anyhow!("No flowing pressure given: pass --pwf or set [constant_pressure].flowing_pressure_psia")
                })?;
            let series = load_data(&data)?;
            let analysis = analyze_constant_pressure(&ConstantPressureInput {
                series: &series,
                flowing_pressure,
                properties: &properties,
            })
            .context("Constant-pressure analysis failed")?;
            info!(
                k_md = analysis.permeability_md,
                skin = analysis.skin,
                "Constant-pressure analysis complete"
            );
            Ok((analysis.into(), series))
        }
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let command = match args.command {
        SubCommand::InitConfig { output } => {
            if output.exists() {
                return Err(anyhow!("{} already exists, refusing to overwrite", output.display()));
            }
            WellTestConfig::template()
                .save_to_file(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Wrote example config to {}", output.display());
            return Ok(());
        }
        SubCommand::Analysis(command) => command,
    };

    let config = WellTestConfig::load(args.config.as_deref()).context("Failed to load config")?;
    info!(well = %config.well.name, field = %config.well.field, "Starting analysis");

    let format = args.format.unwrap_or(config.output.format);
    let precision = args.precision.unwrap_or(config.output.precision);

    let (report, series) = run_analysis(command, &config)?;

    if let Some(path) = &args.plot_data {
        let plots = serde_json::to_string_pretty(&report.plots(&series, precision))
            .context("Failed to serialize plot data")?;
        std::fs::write(path, plots)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Plot data written");
    }

    match format {
        OutputFormat::Text => {
            println!("Well: {}", config.well.name);
            print!("{}", report.to_text(precision));
        }
        OutputFormat::Json => {
            println!("{}", report.to_json().context("Failed to serialize result")?);
        }
    }

    Ok(())
}
