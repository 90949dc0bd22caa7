//! Sample a one-variable function over a grid, estimate its first and second
//! derivatives with finite differences, and read concavity and inflection
//! points off the result.
//!
//! ```rust
//! use concavity::{CatalogKey, PlotConfig, compute};
//!
//! let config = PlotConfig::new(CatalogKey::Cubic, -2.0, 2.0, 5);
//! let d = compute(&config).unwrap();
//! assert_eq!(d.f.values(), &[-2.0, 2.0, 0.0, -2.0, 2.0]);
//! assert_eq!(d.f_prime.len(), 5);
//! assert_eq!(d.f_double_prime.len(), 5);
//! ```

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod differentiate;
pub mod equation;
pub mod errors;
pub mod evaluate;
pub mod grid;
pub mod pipeline;
pub mod series;
pub mod types;

mod test_utils;
mod validation_utils;

pub use crate::catalog::CatalogKey;
pub use crate::config::PlotConfig;
pub use crate::equation::{Expression, Identifier, NumericConstant, Operator};
pub use crate::errors::{ComputeError, EvaluationError, InsufficientSamplesError};
pub use crate::evaluate::FunctionSelection;
pub use crate::grid::SampleGrid;
pub use crate::pipeline::{Derivatives, compute, compute_with};
pub use crate::series::Series;
