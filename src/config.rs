//! # Plot configuration
//!
//! The explicit, immutable set of parameters driving one computation:
//! which function to sample, over which domain, with how many points.
//! Every change produces a new `PlotConfig` and a full recomputation.
//!
//! Configurations can be loaded from JSON; missing fields take the defaults
//! of the interactive tool:
//!
//! ```json
//! {
//!     "function": { "catalog": "quartic" },
//!     "x_min": -3.0,
//!     "x_max": 3.0,
//!     "sample_count": 600
//! }
//! ```

use std::{fs, io, path::Path};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    evaluate::FunctionSelection,
    types::{Validate, ValidationResult},
    validation_utils::{_chain, _return, validate_range},
};

/// Interactive range for `x_min`.
pub const X_MIN_RANGE: (f64, f64) = (-10.0, 0.0);
/// Interactive range for `x_max`.
pub const X_MAX_RANGE: (f64, f64) = (0.0, 10.0);
/// Interactive range for `sample_count`.
pub const SAMPLE_COUNT_RANGE: (usize, usize) = (100, 1000);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading configuration: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {}", .errors.join("; "))]
    Invalid {
        warnings: Vec<String>,
        errors: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub function: FunctionSelection,
    pub x_min: f64,
    pub x_max: f64,
    pub sample_count: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        PlotConfig {
            function: FunctionSelection::default(),
            x_min: -5.0,
            x_max: 5.0,
            sample_count: 400,
        }
    }
}

impl PlotConfig {
    pub fn new(
        function: impl Into<FunctionSelection>,
        x_min: f64,
        x_max: f64,
        sample_count: usize,
    ) -> Self {
        PlotConfig {
            function: function.into(),
            x_min,
            x_max,
            sample_count,
        }
    }

    pub fn with_function(self, function: impl Into<FunctionSelection>) -> Self {
        PlotConfig {
            function: function.into(),
            ..self
        }
    }

    pub fn with_domain(self, x_min: f64, x_max: f64) -> Self {
        PlotConfig {
            x_min,
            x_max,
            ..self
        }
    }

    pub fn with_sample_count(self, sample_count: usize) -> Self {
        PlotConfig {
            sample_count,
            ..self
        }
    }

    /// Parses a JSON configuration without validating it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file without validating it, for callers
    /// that adjust the values before calling [`PlotConfig::checked`].
    pub fn load_unchecked<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("loading configuration from {}", path.display());

        PlotConfig::from_json(&fs::read_to_string(path)?)
    }

    /// Reads and validates a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        PlotConfig::load_unchecked(path)?.checked()
    }

    /// Returns the configuration if it validates, logging any warnings.
    pub fn checked(self) -> Result<Self, ConfigError> {
        match self.validate() {
            ValidationResult::Valid(_) => Ok(self),
            ValidationResult::Warnings(_, warnings) => {
                for warning in &warnings {
                    warn!("{}", warning);
                }
                Ok(self)
            }
            ValidationResult::Invalid(warnings, errors) => {
                Err(ConfigError::Invalid { warnings, errors })
            }
        }
    }
}

impl Validate for PlotConfig {
    fn validate(&self) -> ValidationResult {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        let w = &mut warnings;
        let e = &mut errors;

        _chain(validate_range("x_min", self.x_min, X_MIN_RANGE.0, X_MIN_RANGE.1), w, e);
        _chain(validate_range("x_max", self.x_max, X_MAX_RANGE.0, X_MAX_RANGE.1), w, e);
        _chain(
            validate_range(
                "sample_count",
                self.sample_count,
                SAMPLE_COUNT_RANGE.0,
                SAMPLE_COUNT_RANGE.1,
            ),
            w,
            e,
        );

        // Both bounds may sit at 0.0 while inside their own ranges
        if !(self.x_min < self.x_max) {
            e.push(format!(
                "x_min must be less than x_max, got [{}, {}]",
                self.x_min, self.x_max
            ));
        }

        if let FunctionSelection::Expression(expr) = &self.function {
            if let Err(err) = expr.resolve() {
                e.push(err.to_string());
            }
        }

        _return(warnings, errors)
    }
}
