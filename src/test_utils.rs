#![cfg(test)]

use crate::grid::SampleGrid;

// Helper function to assert floating point equality with tolerance
pub fn assert_float_eq(a: f64, b: f64, tolerance: f64) {
    assert!(
        (a - b).abs() < tolerance,
        "Expected {} to be approximately equal to {} (tolerance: {})",
        a,
        b,
        tolerance
    );
}

/// Element-wise version of [`assert_float_eq`].
pub fn assert_slice_eq(actual: &[f64], expected: &[f64], tolerance: f64) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, b)) in actual.iter().zip(expected).enumerate() {
        assert!(
            (a - b).abs() < tolerance,
            "index {}: expected {} to be approximately equal to {} (tolerance: {})",
            i,
            a,
            b,
            tolerance
        );
    }
}

/// The five-point integer grid `[-2, -1, 0, 1, 2]`.
pub fn unit_grid() -> SampleGrid {
    SampleGrid::uniform(-2.0, 2.0, 5).expect("valid grid")
}
