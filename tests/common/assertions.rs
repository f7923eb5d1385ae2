//! Assertion helpers for tests.

use pretty_assertions::assert_eq;

/// Assert a palette matches the expected color strings in order
pub fn assert_colors(actual: &[String], expected: &[&str]) {
    let actual: Vec<&str> = actual.iter().map(String::as_str).collect();
    assert_eq!(actual, expected, "palette mismatch");
}

/// Assert bytes start with the PNG signature
pub fn assert_png(bytes: &[u8]) {
    const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    assert!(
        bytes.starts_with(&SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}
