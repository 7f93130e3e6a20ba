//! Content length extraction utilities.
//!
//! The server may or may not advertise a body length. Absence is a valid
//! answer and is kept distinct from an advertised length of zero.

use reqwest::header::{HeaderMap, CONTENT_LENGTH};

/// Number of bytes in the "KB" unit used by progress events.
pub const BYTES_PER_KB: u64 = 1024;

/// Extract the advertised body length from response headers.
///
/// Returns `None` when the `Content-Length` header is missing or when its
/// value is not a non-negative integer (a negative length is treated as
/// unknown).
///
/// # Example
///
/// ```rust
/// use fetchpack::utils::advertised_length;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));
/// assert_eq!(advertised_length(&headers), Some(2048));
/// ```
pub fn advertised_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| parse_content_length(value))
}

/// Parse a raw `Content-Length` value.
pub fn parse_content_length(value: &str) -> Option<u64> {
    value.trim().parse::<u64>().ok()
}

/// Convert a byte count to whole kilobytes, truncating.
pub fn to_kb(bytes: u64) -> u64 {
    bytes / BYTES_PER_KB
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_parse_content_length() {
        assert_eq!(parse_content_length("2048"), Some(2048));
        assert_eq!(parse_content_length(" 10 "), Some(10));
        assert_eq!(parse_content_length("0"), Some(0));
        assert_eq!(parse_content_length("-1"), None);
        assert_eq!(parse_content_length("abc"), None);
        assert_eq!(parse_content_length(""), None);
    }

    #[test]
    fn test_advertised_length_missing_header() {
        assert_eq!(advertised_length(&HeaderMap::new()), None);
    }

    #[test]
    fn test_advertised_length_negative_is_unknown() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("-5"));
        assert_eq!(advertised_length(&headers), None);
    }

    #[test]
    fn test_to_kb_truncates() {
        assert_eq!(to_kb(0), 0);
        assert_eq!(to_kb(1023), 0);
        assert_eq!(to_kb(1024), 1);
        assert_eq!(to_kb(4095), 3);
    }
}
