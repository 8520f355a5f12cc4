//! Simulation parameters
//!
//! Every recognised key has a documented default. Missing keys resolve to the
//! default and never to an error; only malformed JSON is rejected.
//!
//! ```
//! use aura_mf_core::{FidelityLevel, SimulationParameters};
//!
//! let params = SimulationParameters::from_json(r#"{"windSpeed": 5.0}"#).unwrap();
//! assert_eq!(params.wind_speed, 5.0);
//! assert_eq!(params.solar_irradiance, 1000.0);
//! assert_eq!(params.fidelity(), FidelityLevel::Low);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SimError;
use crate::solver::FidelityLevel;

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimulationParameters {
    /// Incident solar irradiance (W/m²)
    pub solar_irradiance: f64,
    /// Ambient air temperature (K)
    pub ambient_temp: f64,
    /// Wind speed (m/s)
    pub wind_speed: f64,
    /// Solar absorptivity of the panel surface (0-1)
    pub absorptivity: f64,
    /// Thermal emissivity of the panel surface (0-1)
    pub emissivity: f64,
    /// In-plane thermal conductivity (W/(m·K))
    pub thermal_conductivity: f64,
    /// Panel thickness (m)
    pub thickness: f64,
    /// Nominal cell efficiency (0-1)
    pub cell_efficiency: f64,
    /// Fidelity index (0 = Low, 1 = Medium, 2 = High)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fidelity_level: Option<i64>,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            solar_irradiance: 1000.0,
            ambient_temp: 298.15,
            wind_speed: 2.0,
            absorptivity: 0.9,
            emissivity: 0.9,
            thermal_conductivity: 200.0,
            thickness: 0.005,
            cell_efficiency: 0.2,
            fidelity_level: None,
        }
    }
}

impl SimulationParameters {
    /// Parse parameters from a JSON object, filling missing keys with defaults
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Parse`] if the text is not a JSON object or a
    /// recognised key has a non-numeric value.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set the fidelity index
    pub fn with_fidelity(mut self, level: FidelityLevel) -> Self {
        self.fidelity_level = Some(i64::from(level.index()));
        self
    }

    /// Resolved fidelity level
    ///
    /// Absent or out-of-range indices fall back to [`FidelityLevel::Low`].
    #[must_use]
    pub fn fidelity(&self) -> FidelityLevel {
        match self.fidelity_level {
            None => FidelityLevel::Low,
            Some(index) => FidelityLevel::from_index(index).unwrap_or_else(|| {
                warn!("Fidelity index {} out of range, using Low", index);
                FidelityLevel::Low
            }),
        }
    }

    /// Check parameters against the accepted public ranges
    ///
    /// `run` never calls this; callers that accept untrusted input opt in.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::OutOfRange`] for the first parameter outside its
    /// range. Non-finite values are always out of range.
    pub fn validate(&self) -> Result<(), SimError> {
        let checks: [(&'static str, f64, f64, f64); 8] = [
            ("solarIrradiance", self.solar_irradiance, 0.0, 1500.0),
            ("ambientTemp", self.ambient_temp, 200.0, 400.0),
            ("windSpeed", self.wind_speed, 0.0, 30.0),
            ("absorptivity", self.absorptivity, 0.0, 1.0),
            ("emissivity", self.emissivity, 0.0, 1.0),
            ("thermalConductivity", self.thermal_conductivity, f64::MIN_POSITIVE, 1000.0),
            ("thickness", self.thickness, f64::MIN_POSITIVE, 0.1),
            ("cellEfficiency", self.cell_efficiency, 0.0, 1.0),
        ];

        for (name, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(SimError::OutOfRange {
                    name,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}
