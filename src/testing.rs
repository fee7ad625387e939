//! Helpers shared by the unit tests.

/// Float equality within a few ULPs, scaled to the operands' magnitude.
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= f32::EPSILON * 16.0 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn tolerance_scales_with_magnitude() {
    assert!(approx_eq(1000.0, 1000.0 + 1000.0 * f32::EPSILON));
    assert!(!approx_eq(1.0, 1.001));
    assert!(approx_eq(0.1 + 0.2, 0.3));
}
