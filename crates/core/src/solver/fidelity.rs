//! Fidelity levels
//!
//! A fidelity level selects how many steps or iterations each solver runs.
//! Higher fidelity costs more time; the grid itself never changes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Accuracy/cost tier for one simulation run
///
/// Iteration counts are fixed per level and never adapt at runtime:
///
/// | Level  | Thermal steps | Transport iterations | Fluid iterations |
/// |--------|---------------|----------------------|------------------|
/// | Low    | 5             | 5                    | 10               |
/// | Medium | 20            | 20                   | 40               |
/// | High   | 100           | 50                   | 100              |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FidelityLevel {
    /// Fast preview
    #[default]
    Low,
    /// Balanced
    Medium,
    /// Slowest, most iterations
    High,
}

impl FidelityLevel {
    /// All levels in increasing cost order
    pub const ALL: [FidelityLevel; 3] = [Self::Low, Self::Medium, Self::High];

    /// Level for a configuration index (0, 1, 2), `None` when out of range
    #[must_use]
    pub const fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            _ => None,
        }
    }

    /// Configuration index of this level
    #[must_use]
    pub const fn index(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Display name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Explicit time steps taken by the thermal solver
    #[must_use]
    pub const fn thermal_steps(&self) -> usize {
        match self {
            Self::Low => 5,
            Self::Medium => 20,
            Self::High => 100,
        }
    }

    /// Nominal iteration count of the carrier transport solver
    #[must_use]
    pub const fn transport_iterations(&self) -> usize {
        match self {
            Self::Low => 5,
            Self::Medium => 20,
            Self::High => 50,
        }
    }

    /// Relaxation sweeps taken by the fluid solver
    #[must_use]
    pub const fn fluid_iterations(&self) -> usize {
        match self {
            Self::Low => 10,
            Self::Medium => 40,
            Self::High => 100,
        }
    }

    /// Base energy residual reported for runs at this level
    #[must_use]
    pub const fn residual_base(&self) -> f64 {
        match self {
            Self::Low => 1e-2,
            Self::Medium => 1e-3,
            Self::High => 1e-5,
        }
    }
}

impl fmt::Display for FidelityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
