//! Errors raised at the edges of the engine
//!
//! The solvers themselves never fail. Errors only come from loading or
//! validating configuration, and each renders as a single message.

use std::fmt;

/// Errors that can occur while configuring or driving the engine
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Parameter text could not be parsed
    Parse(String),
    /// Parameter source could not be read
    Io(String),
    /// A result could not be serialized
    Serialize(String),
    /// A parameter lies outside its accepted range
    OutOfRange {
        /// Configuration key of the offending parameter
        name: &'static str,
        /// Value supplied
        value: f64,
        /// Smallest accepted value
        min: f64,
        /// Largest accepted value
        max: f64,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Parse(msg) => write!(f, "Failed to parse parameters: {msg}"),
            SimError::Io(msg) => write!(f, "Failed to read parameters: {msg}"),
            SimError::Serialize(msg) => write!(f, "Failed to serialize result: {msg}"),
            SimError::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(f, "Parameter {name} = {value} out of range [{min}, {max}]"),
        }
    }
}

impl std::error::Error for SimError {}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e.to_string())
    }
}
