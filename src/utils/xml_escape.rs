//! XML escaping helpers for the RSpec writer.
//!
//! Control characters XML 1.0 cannot represent (C0 other than tab, newline
//! and carriage return) are dropped.

/// Whether `c` may not appear in an XML 1.0 document at all
fn is_forbidden(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{1f}') && !matches!(c, '\t' | '\n' | '\r')
}

/// Escape a string for use inside a double-quoted XML attribute
///
/// # Examples
/// ```
/// use rspecgen::utils::xml_escape::escape_attr;
///
/// assert_eq!(escape_attr("a && b"), "a &amp;&amp; b");
/// assert_eq!(escape_attr("say \"hi\""), "say &quot;hi&quot;");
/// ```
pub fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            c if is_forbidden(c) => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape a string for use as XML element text
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c if is_forbidden(c) => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("plain"), "plain");
        assert_eq!(escape_attr("<a href='x'>"), "&lt;a href=&apos;x&apos;&gt;");
        assert_eq!(escape_attr("line1\nline2"), "line1&#10;line2");
    }

    #[test]
    fn test_escape_text_keeps_quotes_and_newlines() {
        assert_eq!(escape_text("\"quoted\"\n"), "\"quoted\"\n");
        assert_eq!(escape_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn test_forbidden_control_characters_dropped() {
        assert_eq!(escape_attr("/a\u{1}b"), "/ab");
        assert_eq!(escape_attr("run\u{0}\u{1b}[0m"), "run[0m");
        assert_eq!(escape_attr("a\r\n"), "a&#13;&#10;");
        assert_eq!(escape_text("x\u{8}y\tz\n"), "xy\tz\n");
    }
}
