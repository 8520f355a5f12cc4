//! End-to-end properties of the simulation engine
//!
//! Covers determinism, fidelity tables, boundary symmetry, relaxation toward
//! ambient, solver independence and the reference scenario.
//!
//! Run tests with: `cargo test --test engine_properties`

use aura_mf_core::grid::CELL_COUNT;
use aura_mf_core::{
    CarrierTransportSolver, CoupledSolver, FidelityLevel, FluidSolver, SimulationOrchestrator,
    SimulationParameters, SimulationResult, ThermalSolver,
};
use approx::assert_relative_eq;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn run_fresh(params: &SimulationParameters) -> SimulationResult {
    SimulationOrchestrator::new().run(params)
}

fn unforced() -> SimulationParameters {
    SimulationParameters {
        solar_irradiance: 0.0,
        absorptivity: 0.0,
        emissivity: 0.0,
        ..Default::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DETERMINISM
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_fresh_instances_are_bit_identical() {
    for level in FidelityLevel::ALL {
        let params = SimulationParameters::default().with_fidelity(level);
        let a = run_fresh(&params);
        let b = run_fresh(&params);

        assert_eq!(a.temperature, b.temperature, "{level} temperature");
        assert_eq!(a.temperature_summary, b.temperature_summary);
        assert_eq!(a.transport, b.transport, "{level} transport");
        assert_eq!(a.fluid, b.fluid, "{level} fluid");
        assert_eq!(a.statistics, b.statistics);
        assert_eq!(a.fidelity, b.fidelity);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FIDELITY
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_iteration_counts_follow_fidelity_tables() {
    let expected = [
        (FidelityLevel::Low, 5, 5, 10),
        (FidelityLevel::Medium, 20, 20, 40),
        (FidelityLevel::High, 100, 50, 100),
    ];

    for (level, thermal, transport, fluid) in expected {
        let result = run_fresh(&SimulationParameters::default().with_fidelity(level));
        assert_eq!(result.thermal_steps, thermal, "{level} thermal steps");
        assert_eq!(result.transport.iterations, transport, "{level} transport iterations");
        assert_eq!(result.fluid.iterations, fluid, "{level} fluid iterations");
        assert_eq!(result.fidelity.name, level.name());
        assert_eq!(result.fidelity.index, level.index());
    }
}

#[test]
fn test_higher_fidelity_changes_result() {
    let low = run_fresh(&SimulationParameters::default().with_fidelity(FidelityLevel::Low));
    let medium = run_fresh(&SimulationParameters::default().with_fidelity(FidelityLevel::Medium));
    let high = run_fresh(&SimulationParameters::default().with_fidelity(FidelityLevel::High));

    assert_ne!(low.temperature_summary.avg, medium.temperature_summary.avg);
    assert_ne!(medium.temperature_summary.avg, high.temperature_summary.avg);
    assert_ne!(low.fluid.max_velocity_magnitude, high.fluid.max_velocity_magnitude);
}

#[test]
fn test_out_of_range_fidelity_falls_back_to_low() {
    for index in [-1, 3, 42] {
        let params = SimulationParameters {
            fidelity_level: Some(index),
            ..Default::default()
        };
        let result = run_fresh(&params);
        assert_eq!(result.fidelity.index, 0);
        assert_eq!(result.thermal_steps, 5);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// THERMAL BEHAVIOUR
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_uniform_field_stays_uniform_without_forcing() {
    // Initial temperature away from ambient: convection still acts, but
    // identically on every cell, so the field cannot develop gradients.
    let params = unforced().with_fidelity(FidelityLevel::High);
    let mut solver = ThermalSolver::with_initial_temperature(310.0);
    let solution = solver.solve(&params, FidelityLevel::High);

    let first = solution.field.as_slice()[0];
    assert!(solution.field.as_slice().iter().all(|&t| t == first));
    assert_eq!(solution.summary.max, solution.summary.min);
}

#[test]
fn test_uniform_ambient_field_is_unchanged_without_forcing() {
    let params = unforced();
    let mut solver = ThermalSolver::with_initial_temperature(params.ambient_temp);
    for level in FidelityLevel::ALL {
        let solution = solver.solve(&params, level);
        assert!(solution.field.as_slice().iter().all(|&t| t == params.ambient_temp));
    }
}

#[test]
fn test_hot_panel_relaxes_toward_ambient_without_sun() {
    let params = SimulationParameters {
        solar_irradiance: 0.0,
        ambient_temp: 298.15,
        ..Default::default()
    };
    let mut solver = ThermalSolver::with_initial_temperature(350.0);
    let solution = solver.solve(&params, FidelityLevel::High);

    assert_eq!(solution.steps, 100);
    assert!(solution.summary.avg < 350.0, "avg {} should drop", solution.summary.avg);
    assert!(solution.summary.avg > params.ambient_temp, "no overshoot past ambient");
}

#[test]
fn test_repeated_runs_accumulate_heat() {
    let mut orchestrator = SimulationOrchestrator::new();
    let params = SimulationParameters::default();
    let first = orchestrator.run(&params);
    let second = orchestrator.run(&params);
    let third = orchestrator.run(&params);

    assert!(second.temperature_summary.avg > first.temperature_summary.avg);
    assert!(third.temperature_summary.avg > second.temperature_summary.avg);
    assert!(third.fluid.max_velocity_magnitude > first.fluid.max_velocity_magnitude);
    assert_eq!(third.run_index, 3);
}

// ═══════════════════════════════════════════════════════════════════════════════
// COUPLING
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_transport_and_fluid_are_order_independent() {
    let params = SimulationParameters::default().with_fidelity(FidelityLevel::Medium);
    let fidelity = params.fidelity();
    let mut thermal = ThermalSolver::new();
    let field = thermal.solve(&params, fidelity).field.clone();

    let mut transport_a = CarrierTransportSolver::new();
    let mut fluid_a = FluidSolver::new();
    let t_first = transport_a.solve(&field, &params, fidelity);
    let f_second = fluid_a.solve(&field, &params, fidelity);

    let mut transport_b = CarrierTransportSolver::new();
    let mut fluid_b = FluidSolver::new();
    let f_first = fluid_b.solve(&field, &params, fidelity);
    let t_second = transport_b.solve(&field, &params, fidelity);

    assert_eq!(t_first, t_second);
    assert_eq!(f_first, f_second);

    // The orchestrator (which runs them concurrently) agrees with both orders.
    let result = SimulationOrchestrator::new().run(&params);
    assert_eq!(result.transport, t_first);
    assert_eq!(result.fluid, f_first);
}

#[test]
fn test_transport_sees_thermal_average() {
    let result = run_fresh(&SimulationParameters::default());
    assert_relative_eq!(
        result.transport.avg_temp,
        result.temperature_summary.avg,
        max_relative = 1e-12
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// REFERENCE SCENARIO
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_reference_scenario_low_fidelity() {
    let params = SimulationParameters::from_json(
        r#"{
            "solarIrradiance": 1000, "ambientTemp": 298.15, "windSpeed": 2.0,
            "absorptivity": 0.9, "emissivity": 0.9, "thermalConductivity": 200,
            "thickness": 0.005, "cellEfficiency": 0.2, "fidelityLevel": 0
        }"#,
    )
    .unwrap();
    let result = run_fresh(&params);

    assert!(result.temperature_summary.avg > 298.15);
    // 1000 W/m² over 20·20·0.1² = 4 m² at 20 %
    assert_relative_eq!(result.statistics.electrical_power, 800.0, epsilon = 1e-9);
    assert_relative_eq!(result.statistics.efficiency_percent, 20.0, epsilon = 1e-12);
    assert_eq!(result.fidelity.name, "Low");

    let record = result.statistics_record();
    assert_eq!(record.total_power, result.statistics.electrical_power);
    assert!(record.to_string().contains("Total Power:     800.00 W"));
}

#[test]
fn test_unstable_step_diverges_without_panicking() {
    let params = SimulationParameters {
        solar_irradiance: 1e9,
        thickness: 1e-9,
        ..Default::default()
    }
    .with_fidelity(FidelityLevel::High);
    let result = run_fresh(&params);

    assert_eq!(result.temperature.len(), CELL_COUNT);
    assert_eq!(result.fluid.velocity_y.len(), CELL_COUNT);
    assert!(result
        .temperature
        .as_slice()
        .iter()
        .any(|t| !t.is_finite()));

    let summary = result.temperature_summary;
    assert!(!summary.max.is_finite(), "max {} should be non-finite", summary.max);
    assert!(!summary.min.is_finite(), "min {} should be non-finite", summary.min);
    assert!(!summary.avg.is_finite(), "avg {} should be non-finite", summary.avg);
    assert!(
        !result.fluid.max_velocity_magnitude.is_finite(),
        "max velocity {} should be non-finite",
        result.fluid.max_velocity_magnitude
    );
}

#[test]
fn test_every_field_has_grid_size() {
    let extreme = SimulationParameters {
        solar_irradiance: 5000.0,
        wind_speed: 0.0,
        thickness: 0.0005,
        ..Default::default()
    };

    for base in [SimulationParameters::default(), unforced(), extreme] {
        for level in FidelityLevel::ALL {
            let result = run_fresh(&base.clone().with_fidelity(level));
            assert_eq!(result.temperature.len(), CELL_COUNT);
            assert_eq!(result.transport.carrier_density.len(), CELL_COUNT);
            assert_eq!(result.fluid.velocity_x.len(), CELL_COUNT);
            assert_eq!(result.fluid.velocity_y.len(), CELL_COUNT);
        }
    }
}

#[test]
fn test_views_cover_result_fields() {
    let result = run_fresh(&SimulationParameters::default());

    let heatmap = result.heatmap();
    assert_eq!(heatmap.width * heatmap.height, CELL_COUNT);
    for index in 0..heatmap.values.len() {
        let n = heatmap.normalized(index);
        assert!((0.0..=1.0).contains(&n), "normalized value {n} out of [0, 1]");
    }

    let arrows: Vec<_> = result.vector_field().sampled(4).collect();
    assert_eq!(arrows.len(), 25);
    assert!(arrows.iter().all(|a| a.vx == 0.0));
}

#[test]
fn test_result_serializes_to_json() {
    let result = run_fresh(&SimulationParameters::default());
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["temperature"]["width"], 20);
    assert_eq!(json["temperature"]["data"].as_array().unwrap().len(), CELL_COUNT);
    assert_eq!(json["fidelity"]["name"], "Low");
}
