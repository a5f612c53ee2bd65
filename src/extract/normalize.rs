use html_escape::decode_html_entities;

/// Punctuation kept by [`normalize_text`]; everything else that is not
/// alphanumeric or whitespace is dropped
const SAFE_PUNCTUATION: &str = ".,;:!?'\"()-/&%+#@*°";

/// Cleans extracted text for export
///
/// 1. Decodes HTML entities (`&amp;`, `&#8217;`, ...)
/// 2. Drops characters outside the alphanumeric/punctuation safe set
/// 3. Collapses whitespace runs to single spaces and trims
///
/// # Examples
///
/// ```
/// use product_scout::extract::normalize_text;
///
/// assert_eq!(normalize_text("Fast &amp; quiet\n\n  motor™"), "Fast & quiet motor");
/// ```
pub fn normalize_text(input: &str) -> String {
    decode_html_entities(input)
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || SAFE_PUNCTUATION.contains(*c))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps at most `max_chars` characters
pub fn truncate_chars(input: &str, max_chars: usize) -> String {
    input.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_entities() {
        assert_eq!(normalize_text("Tom&#39;s &quot;best&quot;"), "Tom's \"best\"");
        assert_eq!(normalize_text("5 &lt; 6"), "5 6");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize_text("  a\t\tb\n\nc  "), "a b c");
    }

    #[test]
    fn test_strips_unsafe_characters() {
        assert_eq!(normalize_text("Price | $10 {sale}"), "Price 10 sale");
        assert_eq!(normalize_text("Temp 90°C, 50% off"), "Temp 90°C, 50% off");
    }

    #[test]
    fn test_keeps_non_ascii_letters() {
        assert_eq!(normalize_text("Café crème"), "Café crème");
    }

    #[test]
    fn test_keeps_text_between_angle_brackets() {
        assert_eq!(
            normalize_text("Fits <X100> and <Pro Base> stands"),
            "Fits X100 and Pro Base stands"
        );
        assert_eq!(normalize_text("&lt;Z9&gt; motor"), "Z9 motor");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
