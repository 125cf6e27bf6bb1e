//! PV plant sizer entry point: CLI wiring and report output.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pv_plant_sizer::config::ScenarioConfig;
use pv_plant_sizer::io::export::export_monthly_csv;
use pv_plant_sizer::runner::run_scenario;

/// Sizes a PV plant for a compute-facility load and estimates its monthly yield.
///
/// If no --scenario or --preset is given, the baseline preset is used.
#[derive(Parser, Debug)]
#[command(name = "pv-plant-sizer", version)]
struct Cli {
    /// Load scenario from TOML config file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    scenario: Option<PathBuf>,

    /// Use a built-in preset (baseline, small_site, hyperscale)
    #[arg(long, value_name = "NAME")]
    preset: Option<String>,

    /// Override the facility load (MW)
    #[arg(long, value_name = "MW")]
    load_mw: Option<f64>,

    /// Override the power usage effectiveness
    #[arg(long)]
    pue: Option<f64>,

    /// Override the sizing capacity factor (fraction, e.g. 0.20)
    #[arg(long, value_name = "FRACTION")]
    capacity_factor: Option<f64>,

    /// Export the monthly series to CSV
    #[arg(long, value_name = "PATH")]
    monthly_out: Option<PathBuf>,

    /// Start REST API server after computing
    #[cfg(feature = "api")]
    #[arg(long)]
    serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000)]
    port: u16,
}

impl Cli {
    /// Loads the scenario: --scenario takes priority, then --preset, then baseline.
    fn scenario(&self) -> anyhow::Result<ScenarioConfig> {
        let mut cfg = if let Some(ref path) = self.scenario {
            ScenarioConfig::from_toml_file(path)?
        } else if let Some(ref name) = self.preset {
            ScenarioConfig::from_preset(name)?
        } else {
            ScenarioConfig::baseline()
        };

        if let Some(v) = self.load_mw {
            cfg.load.load_mw = v;
        }
        if let Some(v) = self.pue {
            cfg.load.pue = v;
        }
        if let Some(v) = self.capacity_factor {
            cfg.load.capacity_factor = v;
        }
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scenario = cli.scenario()?;

    let errors = scenario.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("invalid scenario: {} error(s)", errors.len());
    }

    let estimate = run_scenario(&scenario)?;

    println!("{}", estimate.sizing);
    println!("\n--- Monthly Production ---");
    for m in &estimate.monthly {
        println!("{m}");
    }
    println!("\n{}", estimate.summary);

    if let Some(ref path) = cli.monthly_out {
        export_monthly_csv(&estimate.monthly, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        eprintln!("Monthly series written to {}", path.display());
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(pv_plant_sizer::api::AppState::from(estimate));
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(pv_plant_sizer::api::serve(state, addr))?;
    }

    Ok(())
}
