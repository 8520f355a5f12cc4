use aura_mf_core::{SimError, SimulationOrchestrator, SimulationParameters, SimulationResult};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

/// PV panel simulation demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "aura-headless")]
#[command(about = "Multi-fidelity photovoltaic panel simulation", long_about = None)]
struct Args {
    /// JSON parameter file (camelCase keys, missing keys use defaults)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Solar irradiance in W/m²
    #[arg(long)]
    solar_irradiance: Option<f64>,

    /// Ambient temperature in K
    #[arg(long)]
    ambient_temp: Option<f64>,

    /// Wind speed in m/s
    #[arg(short, long)]
    wind_speed: Option<f64>,

    /// Solar absorptivity (0-1)
    #[arg(long)]
    absorptivity: Option<f64>,

    /// Thermal emissivity (0-1)
    #[arg(long)]
    emissivity: Option<f64>,

    /// Thermal conductivity in W/(m·K)
    #[arg(long)]
    thermal_conductivity: Option<f64>,

    /// Panel thickness in m
    #[arg(long)]
    thickness: Option<f64>,

    /// Nominal cell efficiency (0-1)
    #[arg(long)]
    cell_efficiency: Option<f64>,

    /// Fidelity level (0 = Low, 1 = Medium, 2 = High)
    #[arg(short, long)]
    fidelity: Option<i64>,

    /// Consecutive runs on the same engine (state carries over, at least 1)
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    runs: u32,

    /// Reject parameters outside the accepted ranges
    #[arg(long)]
    validate: bool,

    /// Print an ASCII heatmap of the final temperature field
    #[arg(long)]
    heatmap: bool,

    /// Print the final result as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Defaults, then the parameter file, then individual flags
    fn parameters(&self) -> Result<SimulationParameters, SimError> {
        let mut params = match &self.params {
            Some(path) => SimulationParameters::from_json(&std::fs::read_to_string(path)?)?,
            None => SimulationParameters::default(),
        };

        overlay(&mut params.solar_irradiance, self.solar_irradiance);
        overlay(&mut params.ambient_temp, self.ambient_temp);
        overlay(&mut params.wind_speed, self.wind_speed);
        overlay(&mut params.absorptivity, self.absorptivity);
        overlay(&mut params.emissivity, self.emissivity);
        overlay(&mut params.thermal_conductivity, self.thermal_conductivity);
        overlay(&mut params.thickness, self.thickness);
        overlay(&mut params.cell_efficiency, self.cell_efficiency);
        if self.fidelity.is_some() {
            params.fidelity_level = self.fidelity;
        }

        Ok(params)
    }
}

fn overlay(target: &mut f64, value: Option<f64>) {
    if let Some(v) = value {
        *target = v;
    }
}

// Darkest to brightest
const RAMP: &[u8] = b" .:-=+*#%@";

/// Render the temperature field with row 0 at the bottom
fn ascii_heatmap(result: &SimulationResult) -> String {
    let view = result.heatmap();
    let mut out = String::with_capacity((view.width + 1) * view.height);
    for j in (0..view.height).rev() {
        for i in 0..view.width {
            let n = view.normalized(j * view.width + i).clamp(0.0, 1.0);
            let level = (n * (RAMP.len() - 1) as f64).round() as usize;
            out.push(char::from(RAMP[level]));
        }
        out.push('\n');
    }
    out
}

fn print_row(result: &SimulationResult) {
    println!(
        "{:3} | {:9.3} | {:9.3} | {:11.4e} | {:13.6e} | {:12.2}",
        result.run_index,
        result.temperature_summary.avg,
        result.temperature_summary.max,
        result.transport.avg_current_density,
        result.fluid.max_velocity_magnitude,
        result.runtime_ms
    );
}

fn run(args: &Args) -> Result<(), SimError> {
    let params = args.parameters()?;
    if args.validate {
        params.validate()?;
    }

    println!("=== AURA-MF Panel Simulation ===\n");
    println!(
        "Irradiance: {:.0} W/m², Ambient: {:.2} K, Wind: {:.1} m/s, Fidelity: {}",
        params.solar_irradiance,
        params.ambient_temp,
        params.wind_speed,
        params.fidelity()
    );
    println!(
        "Absorptivity: {:.2}, Emissivity: {:.2}, k: {:.0} W/(m·K), Thickness: {:.4} m\n",
        params.absorptivity, params.emissivity, params.thermal_conductivity, params.thickness
    );

    let mut engine = SimulationOrchestrator::new();

    println!("Run | Avg T (K) | Max T (K) | J (A/m²)    | |v| max (m/s) | Runtime (ms)");
    println!("----|-----------|-----------|-------------|---------------|-------------");
    let mut result = engine.run(&params);
    print_row(&result);
    for _ in 1..args.runs {
        result = engine.run(&params);
        print_row(&result);
    }

    println!("\n=== Final Statistics ===");
    println!("{}", result.statistics_record());
    println!(
        "Temp-corrected:  {:.2} W",
        result.statistics.temperature_corrected_power
    );
    println!("Energy residual: {:.3e}", result.statistics.energy_residual);

    if args.heatmap {
        println!("\n=== Temperature Field ===");
        print!("{}", ascii_heatmap(&result));
    }

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .map_err(|e| SimError::Serialize(e.to_string()))?;
        println!("{json}");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
