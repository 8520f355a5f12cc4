//! AURA-MF simulation core
//!
//! Multi-physics, multi-fidelity simulation of a 2D photovoltaic panel under
//! solar and thermal loading:
//! - explicit finite-difference heat balance (conduction, convection,
//!   radiation, solar gain)
//! - temperature-dependent carrier drift transport
//! - buoyancy-driven air flow over the panel
//!
//! Each solver keeps its fields between runs. The orchestrator runs the
//! thermal solve first and feeds the result to the other two solvers.
//!
//! ```
//! use aura_mf_core::{SimulationOrchestrator, SimulationParameters};
//!
//! let mut engine = SimulationOrchestrator::new();
//! let result = engine.run(&SimulationParameters::default());
//! assert!(result.temperature_summary.avg > 298.15);
//! println!("{}", result.statistics_record());
//! ```

pub mod error;
pub mod grid;
pub mod params;
pub mod simulation;
pub mod solver;

pub use error::SimError;
pub use params::SimulationParameters;
pub use simulation::{SimulationOrchestrator, SimulationResult, StatisticsRecord};
pub use solver::{
    CarrierTransportSolver, CoupledSolver, FidelityLevel, FluidSolver, ScalarField, ThermalSolver,
};
