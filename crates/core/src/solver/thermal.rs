//! Panel heat balance
//!
//! Explicit finite-difference solver for the panel temperature field:
//! ```text
//! ∂T/∂t = α∇²T + (q_solar - q_conv - q_rad) / (ρ·c_p·d)
//! ```
//!
//! Where:
//! - `α∇²T`: in-plane conduction, `α = k/(ρ·c_p)`
//! - `q_solar`: absorbed irradiance `α_abs·G`, uniform over the panel
//! - `q_conv`: convective loss `h·(T - T_amb)`, `h = h_base + h_wind·√v`
//! - `q_rad`: radiative loss to the sky `εσ(T⁴ - T_sky⁴)`, `T_sky = T_amb - 10 K`
//!
//! Boundaries are Neumann (zero gradient): a missing neighbour is replaced
//! by the cell itself. Integration is forward Euler with no stability check;
//! parameters beyond the explicit limit diverge.

use rayon::prelude::*;
use tracing::debug;

use super::fidelity::FidelityLevel;
use super::fields::{FieldSummary, ScalarField};
use crate::grid::{DT, DX, NX, NY};
use crate::params::SimulationParameters;

/// Stefan-Boltzmann constant (W/(m²·K⁴))
pub const STEFAN_BOLTZMANN: f64 = 5.67e-8;

/// Panel density (kg/m³, crystalline silicon)
pub const DENSITY: f64 = 2330.0;

/// Panel specific heat (J/(kg·K))
pub const SPECIFIC_HEAT: f64 = 700.0;

/// Still-air convective coefficient (W/(m²·K))
pub const CONVECTION_BASE: f64 = 5.7;

/// Wind contribution to the convective coefficient (W/(m²·K) per √(m/s))
pub const CONVECTION_WIND: f64 = 3.8;

/// Sky temperature depression below ambient (K)
pub const SKY_TEMP_OFFSET: f64 = 10.0;

/// Reference cell temperature (K, 25 °C)
pub const REFERENCE_TEMP: f64 = 298.15;

/// Per-step coefficients of the heat balance
///
/// Derived once per `solve` from [`SimulationParameters`]; every cell of
/// every step uses the same values.
#[derive(Debug, Clone, Copy)]
pub struct ThermalStepParams {
    /// Timestep in seconds
    pub dt: f64,
    /// Cell spacing in metres
    pub cell_size: f64,
    /// Thermal diffusivity `k/(ρ·c_p)` (m²/s)
    pub diffusivity: f64,
    /// Areal heat capacity `ρ·c_p·d` (J/(m²·K))
    pub areal_heat_capacity: f64,
    /// Convective coefficient (W/(m²·K))
    pub convection_coeff: f64,
    /// Ambient temperature in Kelvin
    pub ambient_temp: f64,
    /// Effective sky temperature in Kelvin
    pub sky_temp: f64,
    /// Surface emissivity (0-1)
    pub emissivity: f64,
    /// Absorbed solar flux (W/m²)
    pub solar_gain: f64,
}

impl ThermalStepParams {
    /// Derive step coefficients from run parameters
    #[must_use]
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            dt: DT,
            cell_size: DX,
            diffusivity: params.thermal_conductivity / (DENSITY * SPECIFIC_HEAT),
            areal_heat_capacity: DENSITY * SPECIFIC_HEAT * params.thickness,
            convection_coeff: CONVECTION_BASE + CONVECTION_WIND * params.wind_speed.sqrt(),
            ambient_temp: params.ambient_temp,
            sky_temp: params.ambient_temp - SKY_TEMP_OFFSET,
            emissivity: params.emissivity,
            solar_gain: params.absorptivity * params.solar_irradiance,
        }
    }
}

/// 5-point Laplacian at `(i, j)` with zero-gradient boundaries
///
/// Written as a sum of neighbour differences so a uniform field gives exactly
/// zero everywhere, edges included.
#[inline]
#[must_use]
pub fn neumann_laplacian(temp: &[f64], width: usize, height: usize, i: usize, j: usize) -> f64 {
    let idx = j * width + i;
    let t = temp[idx];
    let t_left = if i > 0 { temp[idx - 1] } else { t };
    let t_right = if i + 1 < width { temp[idx + 1] } else { t };
    let t_up = if j > 0 { temp[idx - width] } else { t };
    let t_down = if j + 1 < height { temp[idx + width] } else { t };

    (t_left - t) + (t_right - t) + (t_up - t) + (t_down - t)
}

/// One explicit step of the heat balance
///
/// Reads only `temp_in` and writes every cell of `temp_out`, so rows can be
/// updated in parallel without observing a half-written sweep.
///
/// # Arguments
///
/// * `temp_in` - Temperature snapshot (Kelvin)
/// * `temp_out` - Output temperature field (Kelvin)
/// * `width` - Grid width in cells
/// * `height` - Grid height in cells
/// * `params` - Step coefficients
pub fn step_thermal_cpu(
    temp_in: &[f64],
    temp_out: &mut [f64],
    width: usize,
    height: usize,
    params: ThermalStepParams,
) {
    let cell_size_sq = params.cell_size * params.cell_size;
    let sky_temp_4 = params.sky_temp.powi(4);

    temp_out
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(j, row)| {
            for (i, cell_temp) in row.iter_mut().enumerate() {
                let t = temp_in[j * width + i];

                // 1. Conduction
                let laplacian = neumann_laplacian(temp_in, width, height, i, j) / cell_size_sq;

                // 2. Surface fluxes
                let q_conv = params.convection_coeff * (t - params.ambient_temp);
                let q_rad = params.emissivity * STEFAN_BOLTZMANN * (t.powi(4) - sky_temp_4);
                let q_net = params.solar_gain - q_conv - q_rad;

                // 3. Forward Euler
                let dt_temp = (q_net / params.areal_heat_capacity
                    + params.diffusivity * laplacian)
                    * params.dt;
                *cell_temp = t + dt_temp;
            }
        });
}

/// Output of one thermal solve
#[derive(Debug, Clone, Copy)]
pub struct ThermalSolution<'a> {
    /// Temperature field after the last step
    pub field: &'a ScalarField,
    /// Max/min/mean of `field`
    pub summary: FieldSummary,
    /// Steps taken
    pub steps: usize,
}

/// Persistent panel temperature field
///
/// The field is created once and advanced in place by every `solve`; it is
/// never reset. Construct a new solver for a fresh start.
#[derive(Debug, Clone)]
pub struct ThermalSolver {
    // Ping-pong buffers (read from one, write to other, then swap)
    temperature: ScalarField,
    temperature_back: ScalarField,
}

impl ThermalSolver {
    /// Create a solver with the panel at the default ambient temperature
    #[must_use]
    pub fn new() -> Self {
        Self::with_initial_temperature(SimulationParameters::default().ambient_temp)
    }

    /// Create a solver with a uniform initial temperature (K)
    #[must_use]
    pub fn with_initial_temperature(temperature: f64) -> Self {
        Self {
            temperature: ScalarField::on_grid(temperature),
            temperature_back: ScalarField::on_grid(temperature),
        }
    }

    /// Current temperature field
    #[must_use]
    pub fn temperature(&self) -> &ScalarField {
        &self.temperature
    }

    /// Advance the field by one time step
    pub fn step(&mut self, step_params: ThermalStepParams) {
        step_thermal_cpu(
            self.temperature.as_slice(),
            self.temperature_back.as_mut_slice(),
            NX,
            NY,
            step_params,
        );

        // Swap buffers
        std::mem::swap(&mut self.temperature, &mut self.temperature_back);
    }

    /// Advance the field by the number of steps `fidelity` prescribes
    pub fn solve(
        &mut self,
        params: &SimulationParameters,
        fidelity: FidelityLevel,
    ) -> ThermalSolution<'_> {
        let step_params = ThermalStepParams::from_params(params);
        let steps = fidelity.thermal_steps();

        for _ in 0..steps {
            self.step(step_params);
        }

        let summary = self.temperature.summary();
        debug!(
            "Thermal solve: {} steps, T max={:.3}K min={:.3}K avg={:.3}K",
            steps, summary.max, summary.min, summary.avg
        );

        ThermalSolution {
            field: &self.temperature,
            summary,
            steps,
        }
    }
}

impl Default for ThermalSolver {
    fn default() -> Self {
        Self::new()
    }
}
