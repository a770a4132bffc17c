//! Assertion helpers for gesture tests.

use swipedismiss_ui_graphics::Presentation;

/// Assert that a value is within `tolerance` of `expected`.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert both presentation channels approximately match.
pub fn assert_presentation_approx_eq(
    actual: Presentation,
    expected: Presentation,
    tolerance: f32,
    msg: &str,
) {
    assert_approx_eq(
        actual.translation_x,
        expected.translation_x,
        tolerance,
        &format!("{} - translation_x", msg),
    );
    assert_approx_eq(
        actual.alpha,
        expected.alpha,
        tolerance,
        &format!("{} - alpha", msg),
    );
}
