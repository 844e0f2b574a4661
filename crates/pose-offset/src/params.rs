use serde::{Deserialize, Serialize};

use crate::matcher::DEFAULT_EPSILON;
use crate::offset::OffsetQuantization;

/// Error types for the offset finder.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum OffsetFinderError {
    /// The orientation tolerance is not a finite positive number
    #[error("Invalid orientation tolerance {0}, expected a finite positive number")]
    InvalidEpsilon(f64),

    /// The offset grid resolution is not a finite positive number
    #[error("Invalid offset grid resolution {0}, expected a finite positive number")]
    InvalidResolution(f64),
}

/// Structure to define the offset finder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetFinderParams {
    /// Absolute tolerance used to compare orientation/scale blocks.
    pub epsilon: f64,
    /// Quantization applied to offsets before they are used as set keys.
    pub quantization: OffsetQuantization,
}

impl Default for OffsetFinderParams {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            quantization: OffsetQuantization::default(),
        }
    }
}

impl OffsetFinderParams {
    /// Set the orientation tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the offset quantization.
    pub fn with_quantization(mut self, quantization: OffsetQuantization) -> Self {
        self.quantization = quantization;
        self
    }

    /// Check that the parameters can be used for a search.
    pub fn validate(&self) -> Result<(), OffsetFinderError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(OffsetFinderError::InvalidEpsilon(self.epsilon));
        }
        if let OffsetQuantization::Grid(resolution) = self.quantization {
            if !resolution.is_finite() || resolution <= 0.0 {
                return Err(OffsetFinderError::InvalidResolution(resolution));
            }
        }
        Ok(())
    }
}
