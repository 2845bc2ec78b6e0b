//! Numeric `f32` constants.

pub use std::f32::consts::{E, PI, SQRT_2};

/// Factor by which machine epsilon is scaled to give [`EPSILON`].
pub const EPSILON_SCALING: f32 = 16.0;

/// Machine epsilon scaled by [`EPSILON_SCALING`]. Tolerates the rounding of
/// a handful of chained operations.
pub const EPSILON: f32 = f32::EPSILON * EPSILON_SCALING;

/// Practical tolerance for comparisons and singularity checks.
pub const PRECISION_EPSILON: f32 = 1e-6;

/// Offset used to push secondary ray origins off a surface.
pub const SHADOW_EPSILON: f32 = 1e-4;

pub const INV_PI: f32 = std::f32::consts::FRAC_1_PI;
pub const SQRT2: f32 = SQRT_2;
pub const INV_SQRT2: f32 = std::f32::consts::FRAC_1_SQRT_2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_have_expected_ordering() {
        assert!(PI > 3.0);
        assert!(INV_PI < 1.0);
        assert!(SQRT2 > 1.0);
        assert!(INV_SQRT2 < 1.0);
        assert!(E > 2.0);
        assert!(EPSILON > 0.0);
        assert!(SHADOW_EPSILON > 0.0);
        assert!(PRECISION_EPSILON > 0.0);
    }

    #[test]
    fn scaled_epsilon_is_in_expected_range() {
        assert!(EPSILON < 1e-5);
        assert!(EPSILON > 1e-8);
    }
}
