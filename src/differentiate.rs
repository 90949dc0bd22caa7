//! # Finite-difference derivatives
//!
//! Derivatives of sampled values with respect to their grid:
//!
//! - interior points use the central difference
//!   `(y[i+1] - y[i-1]) / (x[i+1] - x[i-1])`,
//! - the first point uses the forward difference
//!   `(y[1] - y[0]) / (x[1] - x[0])`,
//! - the last point uses the backward difference
//!   `(y[n-1] - y[n-2]) / (x[n-1] - x[n-2])`.
//!
//! The second derivative is the derivative of the first derivative on the
//! same grid, not a dedicated three-point second-difference stencil. Near the
//! domain edges this compounds the one-sided error; the shape of f'' there is
//! an artefact of the estimator.
//!
//! ```rust
//! use concavity::differentiate::gradient;
//!
//! let x = [0.0, 1.0, 2.0, 3.0];
//! let y = [0.0, 1.0, 4.0, 9.0];
//! assert_eq!(gradient(&y, &x).unwrap(), vec![1.0, 2.0, 4.0, 5.0]);
//! ```

use num_traits::Float;

use crate::{
    SampleGrid, Series,
    errors::{DifferentiationError, InsufficientSamplesError},
    grid::MIN_SAMPLES,
};

/// Differentiates `values` with respect to the coordinates in `grid`.
///
/// The grid need not be evenly spaced.
///
/// # Errors
/// - [`DifferentiationError::LengthMismatch`] if the slices differ in length.
/// - [`DifferentiationError::InsufficientSamples`] for fewer than two samples.
pub fn gradient<T: Float>(values: &[T], grid: &[T]) -> Result<Vec<T>, DifferentiationError> {
    let n = values.len();
    if n != grid.len() {
        return Err(DifferentiationError::LengthMismatch {
            values: n,
            grid: grid.len(),
        });
    }
    if n < MIN_SAMPLES {
        return Err(InsufficientSamplesError { found: n }.into());
    }

    let mut out = Vec::with_capacity(n);
    out.push((values[1] - values[0]) / (grid[1] - grid[0]));
    for i in 1..n - 1 {
        out.push((values[i + 1] - values[i - 1]) / (grid[i + 1] - grid[i - 1]));
    }
    out.push((values[n - 1] - values[n - 2]) / (grid[n - 1] - grid[n - 2]));

    Ok(out)
}

/// First derivative of a sampled series.
///
/// # Errors
/// Besides the [`gradient`] errors, returns
/// [`DifferentiationError::NonFinite`] at the first point where a difference
/// overflows.
pub fn derivative(series: &Series, grid: &SampleGrid) -> Result<Series, DifferentiationError> {
    let values = gradient(series, grid)?;

    if let Some((&x, &value)) = grid.iter().zip(&values).find(|(_, v)| !v.is_finite()) {
        return Err(DifferentiationError::NonFinite { x, value });
    }

    Ok(Series::new(values))
}

/// Second derivative: the derivative of [`derivative`].
pub fn second_derivative(series: &Series, grid: &SampleGrid) -> Result<Series, DifferentiationError> {
    let first = derivative(series, grid)?;
    derivative(&first, grid)
}
