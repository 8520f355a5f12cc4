//! Simulation orchestration and results
//!
//! [`SimulationOrchestrator`] is the synchronous entry point: one call to
//! `run` takes parameters and returns a [`SimulationResult`].

mod orchestrator;
mod result;

pub use orchestrator::SimulationOrchestrator;
pub use result::{
    temperature_corrected_efficiency, Arrow, DerivedStatistics, FidelityInfo, HeatmapView,
    SimulationResult, StatisticsRecord, VectorFieldView, CORRECTED_EFFICIENCY_RANGE,
    EFFICIENCY_TEMP_COEFF,
};
