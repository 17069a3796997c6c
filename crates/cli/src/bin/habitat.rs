use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use habitat_calculator::config::{CoolantPhase, HabitatConfig, ShapeFamily, load_config, log_range};
use habitat_calculator::design::{Habitat, design_habitat};
use habitat_calculator::export::{summarize, write_csv, write_json};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[path = "habitat/table.rs"]
mod table;

/// Size rotating habitats for one or more power levels and report their masses.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Rotating habitat mass and feasibility calculator"
)]
struct Cli {
    /// Configuration file (.toml or .yaml); built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Single habitat power in W
    #[arg(long, conflicts_with_all = ["min_power", "max_power"])]
    power: Option<f64>,

    /// Lower bound of the power sweep in W
    #[arg(long, default_value_t = 1e9)]
    min_power: f64,

    /// Upper bound of the power sweep in W
    #[arg(long, default_value_t = 1e11)]
    max_power: f64,

    /// Number of geometrically spaced powers in the sweep
    #[arg(long, default_value_t = 5)]
    count: usize,

    /// Override the configured shape family
    #[arg(long, value_enum)]
    shape: Option<ShapeArg>,

    /// Override the configured coolant phase
    #[arg(long, value_enum)]
    coolant: Option<CoolantArg>,

    /// Rebalance friction fractions to reduce cooling mass
    #[arg(long, default_value_t = false)]
    optimize: bool,

    /// Write one CSV row per habitat (`-` for stdout)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the habitats as a JSON array (`-` for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Log solver details
    #[arg(long, short, default_value_t = false)]
    verbose: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum ShapeArg {
    Cylinder,
    Tube,
    Oblate,
    Torus,
    Dumbbell,
    DumbbellTube,
}

impl From<ShapeArg> for ShapeFamily {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Cylinder => ShapeFamily::Cylinder,
            ShapeArg::Tube => ShapeFamily::Tube,
            ShapeArg::Oblate => ShapeFamily::Oblate,
            ShapeArg::Torus => ShapeFamily::Torus,
            ShapeArg::Dumbbell => ShapeFamily::Dumbbell,
            ShapeArg::DumbbellTube => ShapeFamily::DumbbellTube,
        }
    }
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum CoolantArg {
    Liquid,
    Vapor,
    Air,
}

impl From<CoolantArg> for CoolantPhase {
    fn from(arg: CoolantArg) -> Self {
        match arg {
            CoolantArg::Liquid => CoolantPhase::Liquid,
            CoolantArg::Vapor => CoolantPhase::Vapor,
            CoolantArg::Air => CoolantPhase::Air,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = build_config(&cli)?;
    let powers = powers(&cli)?;
    info!(
        shape = config.shape.name(),
        coolant = config.coolant.name(),
        count = powers.len(),
        "evaluating habitats"
    );

    let habitats = powers
        .iter()
        .map(|&power| {
            design_habitat(&config, power)
                .with_context(|| format!("evaluating habitat at {power:.3e} W"))
        })
        .collect::<anyhow::Result<Vec<Habitat>>>()?;

    let to_stdout = [&cli.csv, &cli.json]
        .into_iter()
        .flatten()
        .any(|path| path == Path::new("-"));
    if !to_stdout {
        table::print(&habitats);
    }

    let rows = summarize(&habitats);
    if let Some(path) = &cli.csv {
        write_csv(path, &rows).with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &cli.json {
        write_json(path, &rows).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn build_config(cli: &Cli) -> anyhow::Result<HabitatConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => HabitatConfig::default(),
    };
    if let Some(shape) = cli.shape {
        config.shape = shape.into();
    }
    if let Some(coolant) = cli.coolant {
        config.coolant = coolant.into();
    }
    if cli.optimize {
        config.is_friction_optimized = true;
    }
    config.validate()?;
    Ok(config)
}

fn powers(cli: &Cli) -> anyhow::Result<Vec<f64>> {
    if let Some(power) = cli.power {
        if !(power.is_finite() && power > 0.0) {
            bail!("power must be positive, got {power}");
        }
        return Ok(vec![power]);
    }
    if !(cli.min_power > 0.0 && cli.max_power >= cli.min_power) {
        bail!(
            "power sweep needs 0 < min ({}) <= max ({})",
            cli.min_power,
            cli.max_power
        );
    }
    if cli.count == 0 {
        bail!("power sweep needs at least one point");
    }
    Ok(log_range(cli.count, cli.min_power, cli.max_power))
}
