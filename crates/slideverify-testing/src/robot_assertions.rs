//! Assertion utilities for robot testing

/// Assert that a value is within an expected range.
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

/// Assert that a value lies inside `[min, max]`.
pub fn assert_within(actual: f32, min: f32, max: f32, msg: &str) {
    assert!(
        actual >= min && actual <= max,
        "{}: {} not within [{}, {}]",
        msg,
        actual,
        min,
        max
    );
}

/// Assert that a string contains a specific fragment.
pub fn assert_contains_text(text: &str, fragment: &str, msg: &str) {
    assert!(
        text.contains(fragment),
        "{}: '{}' not found in {:?}",
        msg,
        fragment,
        text
    );
}

/// Assert that a string does not contain a specific fragment.
pub fn assert_not_contains_text(text: &str, fragment: &str, msg: &str) {
    assert!(
        !text.contains(fragment),
        "{}: '{}' unexpectedly found in {:?}",
        msg,
        fragment,
        text
    );
}

/// Assert that a counter has an expected value.
pub fn assert_count(actual: usize, expected: usize, msg: &str) {
    assert_eq!(
        actual, expected,
        "{}: expected {}, got {}",
        msg, expected, actual
    );
}
