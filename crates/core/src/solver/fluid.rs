//! Buoyancy-driven air flow over the panel
//!
//! Relaxes the vertical velocity under thermal buoyancy and vertical viscous
//! diffusion:
//! ```text
//! v ← v + (g·β·(T - T_amb) + ν·∂²v/∂y²)·s
//! ```
//! with a fixed scale `s` standing in for the time step. The vertical
//! diffusion term uses central differences on interior rows and is zero on
//! the top and bottom rows. Horizontal velocity is carried but never driven.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fidelity::FidelityLevel;
use super::fields::{nan_max, ScalarField};
use super::r#trait::CoupledSolver;
use crate::grid::{DX, NX, NY};
use crate::params::SimulationParameters;

/// Gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.81;

/// Volumetric thermal expansion coefficient of air (1/K)
pub const THERMAL_EXPANSION: f64 = 3.4e-3;

/// Kinematic viscosity of air (m²/s)
pub const KINEMATIC_VISCOSITY: f64 = 1.5e-5;

/// Relaxation scale applied per sweep
pub const STEP_SCALE: f64 = 0.01;

/// Coefficients of one relaxation sweep
#[derive(Debug, Clone, Copy)]
pub struct FluidStepParams {
    /// Ambient (reference) temperature in Kelvin
    pub ambient_temp: f64,
    /// Cell spacing in metres
    pub cell_size: f64,
    /// Buoyancy per kelvin of excess temperature `g·β` (m/(s²·K))
    pub buoyancy_coeff: f64,
    /// Kinematic viscosity (m²/s)
    pub viscosity: f64,
    /// Relaxation scale
    pub step_scale: f64,
}

impl FluidStepParams {
    /// Derive sweep coefficients from run parameters
    #[must_use]
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            ambient_temp: params.ambient_temp,
            cell_size: DX,
            buoyancy_coeff: GRAVITY * THERMAL_EXPANSION,
            viscosity: KINEMATIC_VISCOSITY,
            step_scale: STEP_SCALE,
        }
    }
}

/// One relaxation sweep of the vertical velocity
///
/// # Arguments
///
/// * `temperature` - Temperature field (Kelvin)
/// * `vy_in` - Vertical velocity snapshot (m/s)
/// * `vy_out` - Output vertical velocity (m/s)
/// * `width` - Grid width in cells
/// * `height` - Grid height in cells
/// * `params` - Sweep coefficients
pub fn step_fluid_cpu(
    temperature: &[f64],
    vy_in: &[f64],
    vy_out: &mut [f64],
    width: usize,
    height: usize,
    params: FluidStepParams,
) {
    let cell_size_sq = params.cell_size * params.cell_size;

    vy_out
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(j, row)| {
            let interior = j > 0 && j + 1 < height;

            for (i, cell_v) in row.iter_mut().enumerate() {
                let idx = j * width + i;
                let v = vy_in[idx];

                let buoyancy = params.buoyancy_coeff * (temperature[idx] - params.ambient_temp);

                let diffusion = if interior {
                    params.viscosity * (vy_in[idx + width] - 2.0 * v + vy_in[idx - width])
                        / cell_size_sq
                } else {
                    0.0
                };

                *cell_v = v + (buoyancy + diffusion) * params.step_scale;
            }
        });
}

/// Largest `√(vx² + vy²)` over all cells, NaN if any cell is NaN
#[must_use]
pub fn max_velocity_magnitude(vx: &[f64], vy: &[f64]) -> f64 {
    vx.iter()
        .zip(vy)
        .map(|(&u, &v)| u.hypot(v))
        .fold(0.0, nan_max)
}

/// Output of one fluid solve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluidResult {
    /// Horizontal velocity (m/s)
    pub velocity_x: ScalarField,
    /// Vertical velocity (m/s)
    pub velocity_y: ScalarField,
    /// Largest speed over the grid (m/s)
    pub max_velocity_magnitude: f64,
    /// Relaxation sweeps taken
    pub iterations: usize,
}

/// Buoyancy-driven flow with persistent velocity fields
#[derive(Debug, Clone)]
pub struct FluidSolver {
    velocity_x: ScalarField,
    // Ping-pong buffers for the driven component
    velocity_y: ScalarField,
    velocity_y_back: ScalarField,
}

impl FluidSolver {
    /// Create a solver with the air at rest
    #[must_use]
    pub fn new() -> Self {
        Self {
            velocity_x: ScalarField::on_grid(0.0),
            velocity_y: ScalarField::on_grid(0.0),
            velocity_y_back: ScalarField::on_grid(0.0),
        }
    }

    /// Current horizontal velocity field
    #[must_use]
    pub fn velocity_x(&self) -> &ScalarField {
        &self.velocity_x
    }

    /// Current vertical velocity field
    #[must_use]
    pub fn velocity_y(&self) -> &ScalarField {
        &self.velocity_y
    }
}

impl Default for FluidSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CoupledSolver for FluidSolver {
    type Output = FluidResult;

    fn solve(
        &mut self,
        temperature: &ScalarField,
        params: &SimulationParameters,
        fidelity: FidelityLevel,
    ) -> FluidResult {
        let step_params = FluidStepParams::from_params(params);
        let iterations = self.iterations(fidelity);

        for _ in 0..iterations {
            step_fluid_cpu(
                temperature.as_slice(),
                self.velocity_y.as_slice(),
                self.velocity_y_back.as_mut_slice(),
                NX,
                NY,
                step_params,
            );
            std::mem::swap(&mut self.velocity_y, &mut self.velocity_y_back);
        }

        let max_velocity =
            max_velocity_magnitude(self.velocity_x.as_slice(), self.velocity_y.as_slice());
        debug!(
            "Fluid solve: {} iterations, |v| max={:.6e} m/s",
            iterations, max_velocity
        );

        FluidResult {
            velocity_x: self.velocity_x.clone(),
            velocity_y: self.velocity_y.clone(),
            max_velocity_magnitude: max_velocity,
            iterations,
        }
    }

    fn iterations(&self, fidelity: FidelityLevel) -> usize {
        fidelity.fluid_iterations()
    }
}
