//! Markup stripping and text normalization helpers.
//!
//! `strip_html` is a best-effort tag-delimiter scan, not a markup parser:
//! malformed markup is tolerated, never fatal. It is the single sanitize
//! point for all feed text, so it can be swapped for a real parser without
//! touching callers.

/// Strip HTML tags from a string and normalize whitespace.
///
/// Every tag end becomes a word boundary, so `a<br/>b` yields `a b` rather
/// than fusing the adjacent text nodes into `ab` — keyword matching depends
/// on this. The whitespace collapse swallows the extra spaces around tags
/// that already had them.
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate to at most `max` characters, respecting char boundaries.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_simple_tags() {
        assert_eq!(
            strip_html("<p>Acme <b>files</b> for bankruptcy</p>"),
            "Acme files for bankruptcy"
        );
    }

    #[test]
    fn normalizes_whitespace() {
        assert_eq!(strip_html("one\n  two\t three"), "one two three");
    }

    #[test]
    fn tolerates_unclosed_tag() {
        assert_eq!(strip_html("before <a href=\"x\" after"), "before");
    }

    #[test]
    fn markup_only_becomes_empty() {
        assert_eq!(strip_html("<div><br/></div>"), "");
    }

    #[test]
    fn tags_become_word_boundaries() {
        assert_eq!(strip_html("store<br/>closures"), "store closures");
        assert_eq!(
            strip_html("<p>one</p><p>two</p>"),
            "one two",
            "adjacent text nodes must not fuse"
        );
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_html("no markup here"), "no markup here");
    }

    #[test]
    fn truncate_leaves_short_strings_alone() {
        assert_eq!(truncate_chars("short", 300), "short");
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "é".repeat(10);
        assert_eq!(truncate_chars(&s, 4), "éééé");
    }
}
