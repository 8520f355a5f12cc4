//! Simulation results and the views handed to display layers
//!
//! A [`SimulationResult`] owns copies of every field produced by one run, so
//! it stays valid while the orchestrator goes on to the next run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::grid::panel_area;
use crate::params::SimulationParameters;
use crate::solver::{
    FidelityLevel, FieldSummary, FluidResult, ScalarField, TransportResult, REFERENCE_TEMP,
};

/// Efficiency loss per kelvin above the reference temperature (1/K, silicon)
pub const EFFICIENCY_TEMP_COEFF: f64 = 0.004;

/// Bounds applied to the temperature-corrected efficiency
pub const CORRECTED_EFFICIENCY_RANGE: (f64, f64) = (0.05, 0.30);

/// Cell efficiency corrected for operating temperature
///
/// `η(T) = η₀·(1 - β(T - T_ref))`, clamped to [`CORRECTED_EFFICIENCY_RANGE`].
#[must_use]
pub fn temperature_corrected_efficiency(nominal: f64, temperature: f64) -> f64 {
    let (lo, hi) = CORRECTED_EFFICIENCY_RANGE;
    (nominal * (1.0 - EFFICIENCY_TEMP_COEFF * (temperature - REFERENCE_TEMP))).clamp(lo, hi)
}

/// Resolved fidelity of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FidelityInfo {
    /// Configuration index (0, 1, 2)
    pub index: u8,
    /// Display name
    pub name: String,
}

impl From<FidelityLevel> for FidelityInfo {
    fn from(level: FidelityLevel) -> Self {
        Self {
            index: level.index(),
            name: level.name().to_string(),
        }
    }
}

/// Power and efficiency figures derived from one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStatistics {
    /// Panel area `NX·NY·DX²` (m²)
    pub panel_area: f64,
    /// Incident solar power (W)
    pub solar_power: f64,
    /// Electrical power at nominal efficiency (W)
    pub electrical_power: f64,
    /// Nominal efficiency in percent
    pub efficiency_percent: f64,
    /// Electrical power at the temperature-corrected efficiency (W)
    pub temperature_corrected_power: f64,
    /// Convergence indicator for the fidelity level
    pub energy_residual: f64,
}

impl DerivedStatistics {
    /// Derive statistics from run parameters and the final temperature field
    #[must_use]
    pub fn compute(
        params: &SimulationParameters,
        temperature: &ScalarField,
        summary: &FieldSummary,
        fidelity: FidelityLevel,
    ) -> Self {
        let panel_area = panel_area();
        let solar_power = params.solar_irradiance * panel_area;
        let corrected = temperature_corrected_efficiency(params.cell_efficiency, summary.avg);

        Self {
            panel_area,
            solar_power,
            electrical_power: solar_power * params.cell_efficiency,
            efficiency_percent: params.cell_efficiency * 100.0,
            temperature_corrected_power: solar_power * corrected,
            energy_residual: fidelity.residual_base() * (1.0 + temperature.std_dev() / 100.0),
        }
    }
}

/// Everything one orchestrator run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Temperature field after the thermal solve (K)
    pub temperature: ScalarField,
    /// Max/min/mean of `temperature`
    pub temperature_summary: FieldSummary,
    /// Thermal steps taken
    pub thermal_steps: usize,
    /// Carrier transport evaluated on `temperature`
    pub transport: TransportResult,
    /// Flow driven by `temperature`
    pub fluid: FluidResult,
    /// Power and efficiency figures
    pub statistics: DerivedStatistics,
    /// Fidelity the run resolved to
    pub fidelity: FidelityInfo,
    /// Wall-clock duration of the run (ms)
    pub runtime_ms: f64,
    /// 1-based count of runs on the orchestrator that produced this result
    pub run_index: u64,
}

impl SimulationResult {
    /// Temperature field prepared for a heatmap renderer
    #[must_use]
    pub fn heatmap(&self) -> HeatmapView<'_> {
        HeatmapView {
            values: self.temperature.as_slice(),
            width: self.temperature.width,
            height: self.temperature.height,
            min: self.temperature_summary.min,
            max: self.temperature_summary.max,
        }
    }

    /// Velocity components prepared for a vector-field renderer
    #[must_use]
    pub fn vector_field(&self) -> VectorFieldView<'_> {
        VectorFieldView {
            vx: self.fluid.velocity_x.as_slice(),
            vy: self.fluid.velocity_y.as_slice(),
            width: self.fluid.velocity_x.width,
            height: self.fluid.velocity_x.height,
        }
    }

    /// Flat statistics record for text display
    #[must_use]
    pub fn statistics_record(&self) -> StatisticsRecord {
        StatisticsRecord {
            max_temp: self.temperature_summary.max,
            min_temp: self.temperature_summary.min,
            avg_temp: self.temperature_summary.avg,
            total_power: self.statistics.electrical_power,
            efficiency_percent: self.statistics.efficiency_percent,
            current_density: self.transport.avg_current_density,
            max_velocity: self.fluid.max_velocity_magnitude,
            fidelity_name: self.fidelity.name.clone(),
            runtime_ms: self.runtime_ms,
        }
    }
}

/// Scalar field with the range a heatmap normalizes against
#[derive(Debug, Clone, Copy)]
pub struct HeatmapView<'a> {
    /// Row-major values
    pub values: &'a [f64],
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
}

impl HeatmapView<'_> {
    /// `(value - min) / (max - min)` for the cell at `index`
    ///
    /// A flat field (max == min) normalizes to 0.
    #[must_use]
    pub fn normalized(&self, index: usize) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        (self.values[index] - self.min) / range
    }
}

/// One sampled vector of a vector-field view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    /// Column of the sampled cell
    pub i: usize,
    /// Row of the sampled cell
    pub j: usize,
    /// Horizontal component (m/s)
    pub vx: f64,
    /// Vertical component (m/s)
    pub vy: f64,
}

/// Two velocity components on a shared grid
#[derive(Debug, Clone, Copy)]
pub struct VectorFieldView<'a> {
    /// Horizontal components, row-major
    pub vx: &'a [f64],
    /// Vertical components, row-major
    pub vy: &'a [f64],
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl<'a> VectorFieldView<'a> {
    /// Every `stride`-th cell in both directions, starting at `(0, 0)`
    ///
    /// A stride of 0 is treated as 1.
    pub fn sampled(&self, stride: usize) -> impl Iterator<Item = Arrow> + 'a {
        let stride = stride.max(1);
        let (width, vx, vy) = (self.width, self.vx, self.vy);
        (0..self.height).step_by(stride).flat_map(move |j| {
            (0..width).step_by(stride).map(move |i| {
                let idx = j * width + i;
                Arrow {
                    i,
                    j,
                    vx: vx[idx],
                    vy: vy[idx],
                }
            })
        })
    }
}

/// Flat record of the headline numbers of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    /// Hottest cell (K)
    pub max_temp: f64,
    /// Coolest cell (K)
    pub min_temp: f64,
    /// Mean temperature (K)
    pub avg_temp: f64,
    /// Electrical power (W)
    pub total_power: f64,
    /// Nominal efficiency (%)
    pub efficiency_percent: f64,
    /// Mean drift current density (A/m²)
    pub current_density: f64,
    /// Largest air speed (m/s)
    pub max_velocity: f64,
    /// Fidelity display name
    pub fidelity_name: String,
    /// Wall-clock runtime (ms)
    pub runtime_ms: f64,
}

impl fmt::Display for StatisticsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Max Temp:        {:.2} K", self.max_temp)?;
        writeln!(f, "Min Temp:        {:.2} K", self.min_temp)?;
        writeln!(f, "Avg Temp:        {:.2} K", self.avg_temp)?;
        writeln!(f, "Total Power:     {:.2} W", self.total_power)?;
        writeln!(f, "Efficiency:      {:.1} %", self.efficiency_percent)?;
        writeln!(f, "Current Density: {:.4e} A/m²", self.current_density)?;
        writeln!(f, "Max Velocity:    {:.6e} m/s", self.max_velocity)?;
        writeln!(f, "Fidelity:        {}", self.fidelity_name)?;
        write!(f, "Runtime:         {:.2} ms", self.runtime_ms)
    }
}
