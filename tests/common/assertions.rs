//! Test assertion helpers
//!
//! Provides utilities for checking rendered reports without depending on
//! exact whitespace or terminal styling.

/// Assert that a floating-point percentage is approximately equal
///
/// # Examples
///
/// ```ignore
/// assert_approx_eq(cell.percentage, 33.33, 0.01);
/// ```
#[allow(dead_code)]
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < epsilon,
        "Float values not approximately equal:\n  actual: {}\n  expected: {}\n  diff: {} (epsilon: {})",
        actual, expected, diff, epsilon
    );
}

/// Assert that `needles` occur in `haystack` in this order
#[allow(dead_code)]
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let mut offset = 0;
    for needle in needles {
        match haystack[offset..].find(needle) {
            Some(position) => offset += position + needle.len(),
            None => panic!(
                "Expected {:?} after offset {} in:\n{}",
                needle, offset, haystack
            ),
        }
    }
}

/// Names of the programs listed in Markdown table rows, top to bottom
#[allow(dead_code)]
pub fn markdown_row_names(markdown: &str) -> Vec<String> {
    markdown
        .lines()
        .filter(|line| line.starts_with("| **"))
        .filter_map(|line| {
            line.trim_start_matches("| **")
                .split_once("**")
                .map(|(name, _)| name.to_string())
        })
        .collect()
}
