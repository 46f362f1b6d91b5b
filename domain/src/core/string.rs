//! String utilities for the domain layer.

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// Uses byte length for max_len but ensures truncation occurs at valid
/// UTF-8 character boundaries.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", truncate_str(s, max_len.saturating_sub(3)))
    }
}

/// Truncate a string to at most `max_bytes` without splitting a UTF-8
/// character.
///
/// Returns a sub-slice of the original string.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_multibyte() {
        // 'é' is 2 bytes; cutting inside it backs up to the previous boundary
        assert_eq!(truncate("éééé", 6), "é...");
        assert_eq!(truncate("éééé", 8), "éééé");
    }

    #[test]
    fn truncate_str_backs_up_to_boundary() {
        let s = "aéb"; // 1 + 2 + 1 bytes
        assert_eq!(truncate_str(s, 2), "a");
        assert_eq!(truncate_str(s, 3), "aé");
        assert_eq!(truncate_str(s, 10), "aéb");
        assert_eq!(truncate_str("", 10), "");
    }
}
