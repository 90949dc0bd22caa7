//! # Concavity and inflection points
//!
//! Reads the computed series the way the visualizer teaches them:
//!
//! - where `f'' > 0` the function is concave up, where `f'' < 0` concave down;
//! - an inflection point is where `f''` changes sign;
//! - the same points are local maxima or minima of `f'`.
//!
//! Samples with `|f''| <= tolerance` count as flat and are stepped over when
//! looking for sign changes. Crossing locations are estimated by linear
//! interpolation between the bracketing samples.

use itertools::Itertools;
use serde::Serialize;

use crate::pipeline::Derivatives;

/// Absolute threshold below which a second-derivative sample counts as zero.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Concavity {
    /// `f'' > 0`: cup-shaped
    Up,
    /// `f'' < 0`: cap-shaped
    Down,
    Flat,
}

impl Concavity {
    pub fn classify(second_derivative: f64, tolerance: f64) -> Self {
        if second_derivative > tolerance {
            Concavity::Up
        } else if second_derivative < -tolerance {
            Concavity::Down
        } else {
            Concavity::Flat
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    UpToDown,
    DownToUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InflectionPoint {
    pub x: f64,
    pub f: f64,
    pub f_prime: f64,
    pub transition: Transition,
    /// Grid indices of the samples on either side of the sign change
    pub bracket: (usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConcavityInterval {
    pub concavity: Concavity,
    pub x_start: f64,
    pub x_end: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Extremum {
    Maximum,
    Minimum,
}

/// A local extremum of `f'`, which sits at an inflection point of `f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlopeExtremum {
    pub x: f64,
    pub f_prime: f64,
    pub kind: Extremum,
}

fn lerp(x0: f64, y0: f64, x1: f64, y1: f64, x: f64) -> f64 {
    if x1 == x0 {
        return y0;
    }
    let t = (x - x0) / (x1 - x0);
    y0 + t * (y1 - y0)
}

/// Linear interpolation of `values` at `x`, searching segments in `lower..=upper`.
fn interpolate(grid: &[f64], values: &[f64], x: f64, lower: usize, upper: usize) -> f64 {
    let k = (lower..upper)
        .find(|&k| grid[k + 1] >= x)
        .unwrap_or(upper.saturating_sub(1));
    lerp(grid[k], values[k], grid[k + 1], values[k + 1], x)
}

impl Derivatives {
    /// Maximal runs of samples sharing one concavity, in grid order.
    pub fn concavity_intervals(&self, tolerance: f64) -> Vec<ConcavityInterval> {
        let grid = self.grid.points();
        let chunks = self
            .f_double_prime
            .iter()
            .enumerate()
            .chunk_by(|(_, value)| Concavity::classify(**value, tolerance));

        let mut intervals = Vec::new();
        for (concavity, chunk) in &chunks {
            let mut indices = chunk.map(|(i, _)| i);
            if let Some(first) = indices.next() {
                let last = indices.last().unwrap_or(first);
                intervals.push(ConcavityInterval {
                    concavity,
                    x_start: grid[first],
                    x_end: grid[last],
                });
            }
        }
        intervals
    }

    /// Every sign change of `f''`, with the crossing located by linear
    /// interpolation.
    pub fn inflection_points(&self, tolerance: f64) -> Vec<InflectionPoint> {
        let grid = self.grid.points();
        let dd = self.f_double_prime.values();

        dd.iter()
            .enumerate()
            .filter_map(|(i, &value)| match Concavity::classify(value, tolerance) {
                Concavity::Flat => None,
                concavity => Some((i, concavity)),
            })
            .tuple_windows()
            .filter(|((_, before), (_, after))| before != after)
            .map(|((i, before), (j, _))| {
                let t = dd[i] / (dd[i] - dd[j]);
                let x = grid[i] + t * (grid[j] - grid[i]);
                InflectionPoint {
                    x,
                    f: interpolate(grid, &self.f, x, i, j),
                    f_prime: interpolate(grid, &self.f_prime, x, i, j),
                    transition: match before {
                        Concavity::Up => Transition::UpToDown,
                        _ => Transition::DownToUp,
                    },
                    bracket: (i, j),
                }
            })
            .collect()
    }

    /// Local extrema of `f'`: maxima where concavity turns from up to down,
    /// minima where it turns from down to up.
    pub fn slope_extrema(&self, tolerance: f64) -> Vec<SlopeExtremum> {
        self.inflection_points(tolerance)
            .into_iter()
            .map(|point| SlopeExtremum {
                x: point.x,
                f_prime: point.f_prime,
                kind: match point.transition {
                    Transition::UpToDown => Extremum::Maximum,
                    Transition::DownToUp => Extremum::Minimum,
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CatalogKey, pipeline::compute_with, test_utils::assert_float_eq};

    #[test]
    fn test_classify() {
        assert_eq!(Concavity::classify(0.5, 1e-9), Concavity::Up);
        assert_eq!(Concavity::classify(-0.5, 1e-9), Concavity::Down);
        assert_eq!(Concavity::classify(1e-12, 1e-9), Concavity::Flat);
        assert_eq!(Concavity::classify(0.0, 0.0), Concavity::Flat);
    }

    #[test]
    fn test_cubic_on_unit_grid() {
        // f'' = [-3, -3, 0, 3, 3]
        let d = compute_with(CatalogKey::Cubic, -2.0, 2.0, 5).unwrap();

        let points = d.inflection_points(DEFAULT_TOLERANCE);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[0].bracket, (1, 3));
        assert_eq!(points[0].transition, Transition::DownToUp);
        assert_eq!(points[0].f, 0.0);

        let intervals = d.concavity_intervals(DEFAULT_TOLERANCE);
        assert_eq!(
            intervals,
            vec![
                ConcavityInterval { concavity: Concavity::Down, x_start: -2.0, x_end: -1.0 },
                ConcavityInterval { concavity: Concavity::Flat, x_start: 0.0, x_end: 0.0 },
                ConcavityInterval { concavity: Concavity::Up, x_start: 1.0, x_end: 2.0 },
            ]
        );
    }

    #[test]
    fn test_cubic_slope_minimum() {
        let d = compute_with(CatalogKey::Cubic, -5.0, 5.0, 400).unwrap();
        let extrema = d.slope_extrema(DEFAULT_TOLERANCE);
        assert_eq!(extrema.len(), 1);
        assert_eq!(extrema[0].kind, Extremum::Minimum);
        assert_float_eq(extrema[0].x, 0.0, 1e-6);
        // f'(0) = -3
        assert_float_eq(extrema[0].f_prime, -3.0, 1e-2);
    }

    #[test]
    fn test_interpolate_picks_containing_segment() {
        let grid = [0.0, 1.0, 2.0, 3.0];
        let values = [0.0, 10.0, 20.0, 40.0];
        assert_float_eq(interpolate(&grid, &values, 2.5, 0, 3), 30.0, 1e-12);
        assert_float_eq(interpolate(&grid, &values, 0.5, 0, 3), 5.0, 1e-12);
    }
}
