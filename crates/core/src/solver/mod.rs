//! Field solvers for the panel simulation
//!
//! The thermal solver owns the temperature field and runs first. The carrier
//! transport and fluid solvers implement [`CoupledSolver`]: they read a
//! temperature snapshot and keep their own persistent state.
//!
//! Every solver follows the same pattern: a free `*_cpu` kernel that reads a
//! snapshot buffer and writes a separate output buffer, and an owning struct
//! that swaps the two after each sweep.
//!
//! # Example
//!
//! ```rust
//! use aura_mf_core::solver::{CoupledSolver, FidelityLevel, FluidSolver, ThermalSolver};
//! use aura_mf_core::SimulationParameters;
//!
//! let params = SimulationParameters::default();
//! let mut thermal = ThermalSolver::new();
//! let mut fluid = FluidSolver::new();
//!
//! let solution = thermal.solve(&params, FidelityLevel::Low);
//! let flow = fluid.solve(solution.field, &params, FidelityLevel::Low);
//! assert_eq!(flow.iterations, 10);
//! ```

mod fidelity;
mod fields;
pub mod fluid;
pub mod profiler;
pub mod thermal;
pub mod transport;
mod r#trait;

// Re-exports
pub use fidelity::FidelityLevel;
pub use fields::{FieldSummary, ScalarField};
pub use fluid::{FluidResult, FluidSolver};
pub use profiler::ProfilerScope;
pub use r#trait::CoupledSolver;
pub use thermal::{ThermalSolution, ThermalSolver, REFERENCE_TEMP, STEFAN_BOLTZMANN};
pub use transport::{CarrierTransportSolver, TransportResult};
