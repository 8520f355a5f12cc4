//! Multi-physics run orchestration
//!
//! `SimulationOrchestrator` sequences the solvers for one request: the
//! thermal solve runs first, then its field feeds the transport and fluid
//! solvers, which only share that snapshot and run side by side.

use tracing::info;

use super::result::{DerivedStatistics, FidelityInfo, SimulationResult};
use crate::params::SimulationParameters;
use crate::solver::{
    CarrierTransportSolver, CoupledSolver, FluidSolver, ProfilerScope, ThermalSolver,
};

/// Owns the three solvers and composes their outputs per run
///
/// The orchestrator holds no field of its own. Every solver keeps its state
/// between runs, so repeated runs on one instance continue where the last
/// one stopped. Build a new orchestrator for a fresh start.
#[derive(Debug, Clone, Default)]
pub struct SimulationOrchestrator {
    thermal: ThermalSolver,
    transport: CarrierTransportSolver,
    fluid: FluidSolver,
    runs: u64,
}

impl SimulationOrchestrator {
    /// Create an orchestrator with freshly initialized solvers
    #[must_use]
    pub fn new() -> Self {
        Self::from_solvers(
            ThermalSolver::new(),
            CarrierTransportSolver::new(),
            FluidSolver::new(),
        )
    }

    /// Create an orchestrator around existing solvers
    ///
    /// Useful to start from a non-default state, e.g. a panel that is
    /// already warm.
    #[must_use]
    pub fn from_solvers(
        thermal: ThermalSolver,
        transport: CarrierTransportSolver,
        fluid: FluidSolver,
    ) -> Self {
        info!("Creating simulation orchestrator");
        Self {
            thermal,
            transport,
            fluid,
            runs: 0,
        }
    }

    /// Thermal solver and its accumulated field
    pub fn thermal(&self) -> &ThermalSolver {
        &self.thermal
    }

    /// Carrier transport solver
    pub fn transport(&self) -> &CarrierTransportSolver {
        &self.transport
    }

    /// Fluid solver and its accumulated velocity
    pub fn fluid(&self) -> &FluidSolver {
        &self.fluid
    }

    /// Completed runs on this instance
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Run one simulation request
    ///
    /// Resolves the fidelity from `params` (Low when absent or out of range),
    /// advances the thermal field, evaluates transport and flow on the
    /// resulting field and assembles the statistics.
    pub fn run(&mut self, params: &SimulationParameters) -> SimulationResult {
        let timer = ProfilerScope::new("simulation run");
        let fidelity = params.fidelity();

        info!(
            "Simulation run {} at {} fidelity: G={:.1} W/m², T_amb={:.2}K, wind={:.2} m/s",
            self.runs + 1,
            fidelity,
            params.solar_irradiance,
            params.ambient_temp,
            params.wind_speed
        );

        let thermal = self.thermal.solve(params, fidelity);
        let field = thermal.field;

        // Transport and flow only read the thermal snapshot
        let (transport, fluid) = rayon::join(
            || self.transport.solve(field, params, fidelity),
            || self.fluid.solve(field, params, fidelity),
        );

        let statistics = DerivedStatistics::compute(params, field, &thermal.summary, fidelity);
        let temperature = field.clone();
        self.runs += 1;

        let runtime_ms = timer.elapsed_ms();
        info!(
            "Simulation run {} complete in {:.2} ms: T avg={:.2}K, P={:.2} W",
            self.runs, runtime_ms, thermal.summary.avg, statistics.electrical_power
        );

        SimulationResult {
            temperature,
            temperature_summary: thermal.summary,
            thermal_steps: thermal.steps,
            transport,
            fluid,
            statistics,
            fidelity: FidelityInfo::from(fidelity),
            runtime_ms,
            run_index: self.runs,
        }
    }
}
