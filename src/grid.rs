//! # Sample grids
//!
//! An ordered, strictly increasing set of x-coordinates at which a function is
//! sampled. Uniform grids are built the way `linspace` builds them: point `i`
//! is `x_min + i * step`, and the final point is pinned to exactly `x_max` so
//! rounding never moves the right edge of the domain.
//!
//! ```rust
//! use concavity::SampleGrid;
//!
//! let grid = SampleGrid::uniform(-2.0, 2.0, 5).unwrap();
//! assert_eq!(grid.points(), &[-2.0, -1.0, 0.0, 1.0, 2.0]);
//! assert_eq!(grid.step(), Some(1.0));
//! ```

use std::ops::{Deref, Index};

use log::trace;
use serde::{Serialize, Serializer};

use crate::{
    errors::{GridError, InsufficientSamplesError},
    types::{Validate, ValidationResult},
    validation_utils::{_chain, _return, validate_finite, validate_strictly_ascending},
};

/// Fewest samples for which a derivative is defined.
pub const MIN_SAMPLES: usize = 2;

/// Upper bound on the sample count, keeping computation and rendering responsive.
pub const MAX_SAMPLES: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    points: Vec<f64>,
    step: Option<f64>,
}

impl SampleGrid {
    /// Builds `sample_count` evenly spaced points spanning `[x_min, x_max]`.
    ///
    /// # Errors
    /// - [`GridError::NonFiniteBounds`] if either bound is NaN or infinite.
    /// - [`GridError::EmptyDomain`] unless `x_min < x_max`.
    /// - [`GridError::InsufficientSamples`] if `sample_count < 2`.
    /// - [`GridError::TooManySamples`] if `sample_count > MAX_SAMPLES`.
    /// - [`GridError::Degenerate`] if the domain is too narrow or too wide for
    ///   `sample_count` distinct, finite points.
    pub fn uniform(x_min: f64, x_max: f64, sample_count: usize) -> Result<Self, GridError> {
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(GridError::NonFiniteBounds { x_min, x_max });
        }
        if x_min >= x_max {
            return Err(GridError::EmptyDomain { x_min, x_max });
        }
        if sample_count < MIN_SAMPLES {
            return Err(InsufficientSamplesError {
                found: sample_count,
            }
            .into());
        }
        if sample_count > MAX_SAMPLES {
            return Err(GridError::TooManySamples {
                found: sample_count,
                max: MAX_SAMPLES,
            });
        }

        let step = (x_max - x_min) / (sample_count - 1) as f64;
        if !step.is_finite() || step <= 0.0 {
            return Err(GridError::Degenerate(vec![format!(
                "spacing of {} points over [{}, {}] is not representable (step {})",
                sample_count, x_min, x_max, step
            )]));
        }

        let mut points: Vec<f64> = (0..sample_count)
            .map(|i| x_min + i as f64 * step)
            .collect();
        points[sample_count - 1] = x_max;

        let grid = SampleGrid {
            points,
            step: Some(step),
        };
        // Rounding can still collapse neighbours on very narrow domains
        if let ValidationResult::Invalid(_, errors) = grid.validate() {
            return Err(GridError::Degenerate(errors));
        }

        trace!(
            "built uniform grid over [{}, {}] with {} points (step {})",
            x_min, x_max, sample_count, step
        );

        Ok(grid)
    }

    /// Builds a grid from explicit coordinates, which need not be evenly spaced.
    ///
    /// # Errors
    /// Returns [`GridError::InsufficientSamples`] for fewer than two points and
    /// [`GridError::InvalidPoints`] if any point is not finite or the points
    /// are not strictly increasing.
    pub fn from_points(points: Vec<f64>) -> Result<Self, GridError> {
        if points.len() < MIN_SAMPLES {
            return Err(InsufficientSamplesError {
                found: points.len(),
            }
            .into());
        }

        let grid = SampleGrid { points, step: None };
        match grid.validate() {
            ValidationResult::Invalid(_, errors) => Err(GridError::InvalidPoints(errors)),
            _ => Ok(grid),
        }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn x_min(&self) -> f64 {
        self.points[0]
    }

    pub fn x_max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// The nominal spacing, for grids built with [`SampleGrid::uniform`].
    pub fn step(&self) -> Option<f64> {
        self.step
    }
}

impl Deref for SampleGrid {
    type Target = [f64];

    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

impl Index<usize> for SampleGrid {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

/// Serializes as the plain list of points.
impl Serialize for SampleGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(&self.points)
    }
}

impl Validate for SampleGrid {
    fn validate(&self) -> ValidationResult {
        let mut warnings = Vec::new();
        let mut errors = Vec::new();

        _chain(validate_finite(&self.points), &mut warnings, &mut errors);
        _chain(
            validate_strictly_ascending(&self.points),
            &mut warnings,
            &mut errors,
        );

        _return(warnings, errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_float_eq;

    #[test]
    fn test_uniform_spacing() {
        let grid = SampleGrid::uniform(-5.0, 5.0, 400).unwrap();
        assert_eq!(grid.len(), 400);
        assert_eq!(grid.x_min(), -5.0);
        assert_eq!(grid.x_max(), 5.0);

        let step = grid.step().unwrap();
        assert_float_eq(step, 10.0 / 399.0, 1e-15);
        for pair in grid.windows(2) {
            assert_float_eq(pair[1] - pair[0], step, 1e-12);
        }
    }

    #[test]
    fn test_last_point_is_pinned() {
        let grid = SampleGrid::uniform(0.0, std::f64::consts::TAU, 100).unwrap();
        assert_eq!(grid.x_max(), std::f64::consts::TAU);
    }

    #[test]
    fn test_two_points() {
        let grid = SampleGrid::uniform(0.0, 1.0, 2).unwrap();
        assert_eq!(grid.points(), &[0.0, 1.0]);
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(matches!(
            SampleGrid::uniform(1.0, 1.0, 10),
            Err(GridError::EmptyDomain { .. })
        ));
        assert!(matches!(
            SampleGrid::uniform(2.0, -2.0, 10),
            Err(GridError::EmptyDomain { .. })
        ));
        assert!(matches!(
            SampleGrid::uniform(f64::NAN, 1.0, 10),
            Err(GridError::NonFiniteBounds { .. })
        ));
        assert!(matches!(
            SampleGrid::uniform(0.0, f64::INFINITY, 10),
            Err(GridError::NonFiniteBounds { .. })
        ));
    }

    #[test]
    fn test_sample_count_limits() {
        assert_eq!(
            SampleGrid::uniform(0.0, 1.0, 1),
            Err(GridError::InsufficientSamples(InsufficientSamplesError {
                found: 1
            }))
        );
        assert!(matches!(
            SampleGrid::uniform(0.0, 1.0, MAX_SAMPLES + 1),
            Err(GridError::TooManySamples { .. })
        ));
        assert!(SampleGrid::uniform(0.0, 1.0, MAX_SAMPLES).is_ok());
    }

    #[test]
    fn test_subnormal_domain_is_degenerate() {
        // The step rounds to zero
        assert!(matches!(
            SampleGrid::uniform(0.0, 5e-324, 3),
            Err(GridError::Degenerate(_))
        ));
        // The step is representable but neighbouring points collapse
        assert!(matches!(
            SampleGrid::uniform(0.0, 1e-323, 4),
            Err(GridError::Degenerate(_))
        ));
        assert!(matches!(
            SampleGrid::uniform(1.0, 1.0 + f64::EPSILON, 10),
            Err(GridError::Degenerate(_))
        ));
    }

    #[test]
    fn test_overflowing_domain_is_degenerate() {
        let err = SampleGrid::uniform(-1e308, 1e308, 5).unwrap_err();
        assert!(matches!(err, GridError::Degenerate(_)));
        assert!(err.to_string().contains("not representable"));
    }

    #[test]
    fn test_narrow_but_representable_domain() {
        let grid = SampleGrid::uniform(0.0, 1e-300, 100).unwrap();
        assert_eq!(grid.len(), 100);
        assert!(grid.validate().is_valid());
    }

    #[test]
    fn test_from_points() {
        let grid = SampleGrid::from_points(vec![0.0, 0.1, 0.5, 2.0]).unwrap();
        assert_eq!(grid.step(), None);
        assert_eq!(grid.len(), 4);

        assert!(matches!(
            SampleGrid::from_points(vec![0.0, 0.0, 1.0]),
            Err(GridError::InvalidPoints(_))
        ));
        assert!(matches!(
            SampleGrid::from_points(vec![0.0, f64::NAN]),
            Err(GridError::InvalidPoints(_))
        ));
        assert!(matches!(
            SampleGrid::from_points(vec![0.0]),
            Err(GridError::InsufficientSamples(_))
        ));
    }
}
