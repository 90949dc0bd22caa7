//! The sample → differentiate → differentiate pipeline.
//!
//! Each call builds a fresh grid and fresh series; nothing is cached between
//! calls and a returned [`Derivatives`] is never touched again.

use log::debug;
use serde::Serialize;

use crate::{
    PlotConfig, SampleGrid, Series,
    differentiate::derivative,
    errors::ComputeError,
    evaluate::{FunctionSelection, evaluate},
};

/// A function and its first two derivatives, aligned with one grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derivatives {
    pub grid: SampleGrid,
    pub f: Series,
    pub f_prime: Series,
    pub f_double_prime: Series,
}

impl Derivatives {
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Rows of `(x, f, f', f'')`.
    pub fn rows(&self) -> impl Iterator<Item = (f64, f64, f64, f64)> + '_ {
        (0..self.len()).map(move |i| {
            (
                self.grid[i],
                self.f[i],
                self.f_prime[i],
                self.f_double_prime[i],
            )
        })
    }
}

/// Runs the whole pipeline for one configuration.
///
/// Only the core invariants are enforced here (`x_min < x_max`, finite
/// bounds, `2 <= sample_count <= MAX_SAMPLES`); the narrower interactive
/// bounds are the job of `PlotConfig::validate`.
pub fn compute(config: &PlotConfig) -> Result<Derivatives, ComputeError> {
    compute_with(
        config.function.clone(),
        config.x_min,
        config.x_max,
        config.sample_count,
    )
}

pub fn compute_with(
    function: impl Into<FunctionSelection>,
    x_min: f64,
    x_max: f64,
    sample_count: usize,
) -> Result<Derivatives, ComputeError> {
    let function = function.into();
    let grid = SampleGrid::uniform(x_min, x_max, sample_count)?;
    compute_on_grid(&function, grid)
}

/// Runs the pipeline on an explicit grid, e.g. one built with
/// [`SampleGrid::from_points`].
pub fn compute_on_grid(
    function: &FunctionSelection,
    grid: SampleGrid,
) -> Result<Derivatives, ComputeError> {
    let f = evaluate(function, &grid)?;
    let f_prime = derivative(&f, &grid)?;
    let f_double_prime = derivative(&f_prime, &grid)?;

    debug!(
        "computed f, f', f'' for '{}' on [{}, {}] with {} points",
        function,
        grid.x_min(),
        grid.x_max(),
        grid.len()
    );

    Ok(Derivatives {
        grid,
        f,
        f_prime,
        f_double_prime,
    })
}
