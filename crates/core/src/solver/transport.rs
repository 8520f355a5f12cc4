//! Carrier drift-diffusion transport
//!
//! Evaluates the drift current of the panel's charge carriers at the present
//! temperature. Per cell:
//! ```text
//! μ = μ₀·(300/T)^2.4          lattice-scattering mobility
//! D = μ·k_B·T/q               Einstein relation
//! J = q·n·μ·E                 drift current density
//! ```
//! The carrier density `n` is owned by the solver but not evolved: transport
//! is recomputed from temperature on every call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fidelity::FidelityLevel;
use super::fields::ScalarField;
use super::r#trait::CoupledSolver;
use crate::params::SimulationParameters;

/// Elementary charge (C)
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

/// Boltzmann constant (J/K)
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Electron mobility at 300 K (m²/(V·s), silicon)
pub const MOBILITY_300K: f64 = 0.14;

/// Exponent of the lattice-scattering mobility law
pub const MOBILITY_EXPONENT: f64 = 2.4;

/// Uniform initial carrier density (m⁻³)
pub const INITIAL_CARRIER_DENSITY: f64 = 1.0e21;

/// Nominal in-plane electric field (V/m)
pub const NOMINAL_FIELD: f64 = 100.0;

/// Temperature-dependent mobility (m²/(V·s))
#[inline]
#[must_use]
pub fn mobility(temperature: f64) -> f64 {
    MOBILITY_300K * (300.0 / temperature).powf(MOBILITY_EXPONENT)
}

/// Einstein-relation diffusion coefficient (m²/s)
#[inline]
#[must_use]
pub fn diffusion_coefficient(mobility: f64, temperature: f64) -> f64 {
    mobility * BOLTZMANN * temperature / ELEMENTARY_CHARGE
}

/// Drift current density (A/m²)
#[inline]
#[must_use]
pub fn drift_current_density(density: f64, mobility: f64) -> f64 {
    ELEMENTARY_CHARGE * density * mobility * NOMINAL_FIELD
}

/// Output of one transport evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportResult {
    /// Carrier density field (m⁻³)
    pub carrier_density: ScalarField,
    /// Mean drift current density (A/m²)
    pub avg_current_density: f64,
    /// Mean panel temperature the transport saw (K)
    pub avg_temp: f64,
    /// Mean Einstein diffusion coefficient (m²/s)
    pub avg_diffusion_coefficient: f64,
    /// Nominal iteration count for the fidelity level
    pub iterations: usize,
}

/// Cell-averaged transport quantities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransportAverages {
    /// Mean drift current density (A/m²)
    pub current_density: f64,
    /// Mean temperature (K)
    pub temperature: f64,
    /// Mean diffusion coefficient (m²/s)
    pub diffusion_coefficient: f64,
}

/// Single pass over all cells, averaging current density and temperature
///
/// # Arguments
///
/// * `temperature` - Temperature field (Kelvin)
/// * `density` - Carrier density field (m⁻³), same length as `temperature`
#[must_use]
pub fn evaluate_transport_cpu(temperature: &[f64], density: &[f64]) -> TransportAverages {
    let (sum_j, sum_t, sum_d) = temperature.iter().zip(density).fold(
        (0.0, 0.0, 0.0),
        |(sum_j, sum_t, sum_d), (&t, &n)| {
            let mu = mobility(t);
            (
                sum_j + drift_current_density(n, mu),
                sum_t + t,
                sum_d + diffusion_coefficient(mu, t),
            )
        },
    );

    let cells = temperature.len().max(1) as f64;
    TransportAverages {
        current_density: sum_j / cells,
        temperature: sum_t / cells,
        diffusion_coefficient: sum_d / cells,
    }
}

/// Carrier transport with a persistent carrier density field
#[derive(Debug, Clone)]
pub struct CarrierTransportSolver {
    carrier_density: ScalarField,
}

impl CarrierTransportSolver {
    /// Create a solver with the uniform initial carrier density
    #[must_use]
    pub fn new() -> Self {
        Self {
            carrier_density: ScalarField::on_grid(INITIAL_CARRIER_DENSITY),
        }
    }

    /// Current carrier density field
    #[must_use]
    pub fn carrier_density(&self) -> &ScalarField {
        &self.carrier_density
    }
}

impl Default for CarrierTransportSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CoupledSolver for CarrierTransportSolver {
    type Output = TransportResult;

    fn solve(
        &mut self,
        temperature: &ScalarField,
        _params: &SimulationParameters,
        fidelity: FidelityLevel,
    ) -> TransportResult {
        let averages =
            evaluate_transport_cpu(temperature.as_slice(), self.carrier_density.as_slice());

        debug!(
            "Transport solve: J avg={:.4e} A/m², T avg={:.3}K",
            averages.current_density, averages.temperature
        );

        TransportResult {
            carrier_density: self.carrier_density.clone(),
            avg_current_density: averages.current_density,
            avg_temp: averages.temperature,
            avg_diffusion_coefficient: averages.diffusion_coefficient,
            iterations: self.iterations(fidelity),
        }
    }

    fn iterations(&self, fidelity: FidelityLevel) -> usize {
        fidelity.transport_iterations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mobility_reference_point() {
        assert_relative_eq!(mobility(300.0), MOBILITY_300K);
        // Hotter lattice scatters more
        assert!(mobility(350.0) < mobility(300.0));
        assert!(mobility(250.0) > mobility(300.0));
    }

    #[test]
    fn test_einstein_relation_thermal_voltage() {
        // D/μ = k_B·T/q ≈ 25.85 mV at 300 K
        let d = diffusion_coefficient(1.0, 300.0);
        assert_relative_eq!(d, 0.025852, epsilon = 1e-5);
    }

    #[test]
    fn test_uniform_field_current_density() {
        let temperature = ScalarField::on_grid(300.0);
        let mut solver = CarrierTransportSolver::new();
        let result = solver.solve(
            &temperature,
            &SimulationParameters::default(),
            FidelityLevel::Low,
        );

        let expected = ELEMENTARY_CHARGE * INITIAL_CARRIER_DENSITY * MOBILITY_300K * NOMINAL_FIELD;
        assert_relative_eq!(result.avg_current_density, expected, max_relative = 1e-12);
        assert_relative_eq!(result.avg_temp, 300.0, max_relative = 1e-12);
        assert_eq!(result.iterations, 5);
    }

    #[test]
    fn test_averages_over_mixed_field() {
        let temperature = [300.0, 600.0];
        let density = [1.0e21, 1.0e21];
        let avg = evaluate_transport_cpu(&temperature, &density);

        let j_300 = drift_current_density(1.0e21, mobility(300.0));
        let j_600 = drift_current_density(1.0e21, mobility(600.0));
        assert_relative_eq!(avg.current_density, (j_300 + j_600) / 2.0, max_relative = 1e-12);
        assert_relative_eq!(avg.temperature, 450.0);
    }

    #[test]
    fn test_carrier_density_is_not_evolved() {
        let mut solver = CarrierTransportSolver::new();
        let hot = ScalarField::on_grid(400.0);
        for level in FidelityLevel::ALL {
            let result = solver.solve(&hot, &SimulationParameters::default(), level);
            assert_eq!(result.iterations, level.transport_iterations());
            assert!(result
                .carrier_density
                .as_slice()
                .iter()
                .all(|&n| n == INITIAL_CARRIER_DENSITY));
        }
        assert!(solver
            .carrier_density()
            .as_slice()
            .iter()
            .all(|&n| n == INITIAL_CARRIER_DENSITY));
    }
}
