/// Field text without surrounding blanks or one pair of enclosing quotes.
pub fn clean_str(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Czech exports write decimals with a comma.
pub fn normalize_decimal(raw: &str) -> String {
    clean_str(raw).replace(',', ".")
}

/// First `width` characters of `raw` (not bytes: the text is Czech).
pub fn truncate_chars(raw: &str, width: usize) -> &str {
    match raw.char_indices().nth(width) {
        Some((byte_idx, _)) => &raw[..byte_idx],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_and_normalizes() {
        assert_eq!(clean_str("  \"abc\" "), "abc");
        assert_eq!(clean_str("\""), "\"");
        assert_eq!(normalize_decimal(" -1 234,5 "), "-1 234.5");
        assert_eq!(normalize_decimal("12,5"), "12.5");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_chars("Žďár", 2), "Žď");
        assert_eq!(truncate_chars("ab", 4), "ab");
        assert_eq!(truncate_chars("", 4), "");
    }
}
