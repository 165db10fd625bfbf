//! Markup escaping and length capping for untrusted input

use once_cell::sync::Lazy;
use regex::Regex;

static ENTITY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:[a-zA-Z][a-zA-Z0-9]*|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("Invalid entity regex")
});

/// HTML-escape every markup-significant character.
///
/// Not idempotent: `&` is always escaped, so applying it twice double-escapes.
/// Each pipeline stage applies it exactly once.
pub fn sanitize(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        push_escaped(&mut escaped, c);
    }
    escaped
}

/// Escape raw markup while leaving well-formed character entities untouched.
///
/// Safe to run over text that already went through [`sanitize`]: the result
/// is unchanged. Raw `<`, `>` and quotes are still escaped.
pub fn escape_unescaped(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for segment in split_entities(text) {
        match segment {
            Segment::Entity(entity) => escaped.push_str(entity),
            Segment::Text(plain) => {
                for c in plain.chars() {
                    push_escaped(&mut escaped, c);
                }
            }
        }
    }
    escaped
}

/// Keep at most `max_len` characters.
///
/// Cuts mid-word on purpose: the cap is a hard character budget, not a
/// presentation boundary.
pub fn truncate(text: &str, max_len: usize) -> &str {
    match text.char_indices().nth(max_len) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Entity(&'a str),
}

/// Split text into alternating plain runs and `&name;` / `&#n;` entities
pub(crate) fn split_entities(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for entity in ENTITY_REGEX.find_iter(text) {
        if entity.start() > last {
            segments.push(Segment::Text(&text[last..entity.start()]));
        }
        segments.push(Segment::Entity(entity.as_str()));
        last = entity.end();
    }
    if last < text.len() {
        segments.push(Segment::Text(&text[last..]));
    }

    segments
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#x27;"),
        _ => out.push(c),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_script() {
        let escaped = sanitize("<script>alert('xss')</script>");
        assert_eq!(escaped, "&lt;script&gt;alert(&#x27;xss&#x27;)&lt;/script&gt;");
        assert!(!escaped.contains("<script>"));
    }

    #[test]
    fn test_sanitize_applied_twice_double_escapes() {
        let once = sanitize("R&D");
        assert_eq!(once, "R&amp;D");
        assert_eq!(sanitize(&once), "R&amp;amp;D");
    }

    #[test]
    fn test_escape_unescaped_preserves_entities() {
        let once = sanitize("a < b && \"c\"");
        assert_eq!(escape_unescaped(&once), once);
    }

    #[test]
    fn test_escape_unescaped_escapes_raw_markup() {
        assert_eq!(escape_unescaped("&lt;ok&gt; <b>"), "&lt;ok&gt; &lt;b&gt;");
        assert_eq!(escape_unescaped("fish & chips"), "fish &amp; chips");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("python", 10), "python");
        assert_eq!(truncate("python", 6), "python");
        assert_eq!(truncate("python developer", 8), "python d");
        assert_eq!(truncate("", 3), "");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("résumé text", 6), "résumé");
    }

    #[test]
    fn test_split_entities() {
        let segments = split_entities("a&amp;b&#39;");
        assert_eq!(
            segments,
            vec![
                Segment::Text("a"),
                Segment::Entity("&amp;"),
                Segment::Text("b"),
                Segment::Entity("&#39;"),
            ]
        );
    }
}
