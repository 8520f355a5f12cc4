//! Coupled solver trait definition
//!
//! Solvers downstream of the thermal field implement `CoupledSolver`: they
//! consume a read-only temperature snapshot and advance (or evaluate) their
//! own persistent state. Because they only share the snapshot, any two
//! coupled solvers can run in either order or concurrently.

use super::fidelity::FidelityLevel;
use super::fields::ScalarField;
use crate::params::SimulationParameters;

/// Solver driven by a temperature field
pub trait CoupledSolver: Send + Sync {
    /// Result produced by one solve
    type Output: Send;

    /// Solve against a temperature snapshot
    ///
    /// # Arguments
    ///
    /// * `temperature` - Temperature field in Kelvin, row-major on the simulation grid
    /// * `params` - Run parameters
    /// * `fidelity` - Fidelity level selecting the iteration count
    fn solve(
        &mut self,
        temperature: &ScalarField,
        params: &SimulationParameters,
        fidelity: FidelityLevel,
    ) -> Self::Output;

    /// Iteration count this solver uses at `fidelity`
    fn iterations(&self, fidelity: FidelityLevel) -> usize;
}
