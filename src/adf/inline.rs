//! Inline formatting: splits a line into plain and bold text runs.

use std::sync::LazyLock;

use regex::Regex;

use super::node::Span;

/// `**bold**` or `__bold__`. Each delimiter only closes its own kind, and the
/// shortest inner text wins.
static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*|__(.*?)__").expect("bold pattern is a valid regex")
});

/// Parses `**` / `__` bold markers in `text` into spans.
///
/// Unmatched delimiters stay in the output as literal characters. Empty
/// runs are dropped, so `"****"` yields no spans at all.
///
/// ```
/// use lantern::adf::{parse_inline, Span};
///
/// assert_eq!(
///     parse_inline("a**b**c"),
///     vec![Span::plain("a"), Span::bold("b"), Span::plain("c")]
/// );
/// ```
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last = 0;

    for caps in BOLD.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };

        if whole.start() > last {
            spans.push(Span::plain(&text[last..whole.start()]));
        }

        let inner = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str());
        if !inner.is_empty() {
            spans.push(Span::bold(inner));
        }

        last = whole.end();
    }

    if last < text.len() {
        spans.push(Span::plain(&text[last..]));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_plain_text_is_one_span() {
        assert_eq!(parse_inline("hello world"), vec![Span::plain("hello world")]);
    }

    #[test]
    fn test_whole_line_bold() {
        assert_eq!(parse_inline("**x**"), vec![Span::bold("x")]);
    }

    #[test]
    fn test_bold_in_the_middle() {
        assert_eq!(
            parse_inline("a**b**c"),
            vec![Span::plain("a"), Span::bold("b"), Span::plain("c")]
        );
    }

    #[test]
    fn test_underscore_delimiters() {
        assert_eq!(
            parse_inline("see __this__ now"),
            vec![Span::plain("see "), Span::bold("this"), Span::plain(" now")]
        );
    }

    #[test]
    fn test_delimiters_do_not_cross_match() {
        assert_eq!(parse_inline("**a__"), vec![Span::plain("**a__")]);
        assert_eq!(parse_inline("**a__b**"), vec![Span::bold("a__b")]);
    }

    #[test]
    fn test_empty_bold_is_dropped() {
        assert!(parse_inline("****").is_empty());
        assert_eq!(
            parse_inline("a****b"),
            vec![Span::plain("a"), Span::plain("b")]
        );
    }

    #[test]
    fn test_dangling_delimiter_is_literal() {
        assert_eq!(
            parse_inline("**one** and **two"),
            vec![Span::bold("one"), Span::plain(" and **two")]
        );
    }

    #[test]
    fn test_shortest_inner_text_wins() {
        assert_eq!(
            parse_inline("**a** b **c**"),
            vec![Span::bold("a"), Span::plain(" b "), Span::bold("c")]
        );
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        assert_eq!(
            parse_inline("Åben **sag** følger"),
            vec![Span::plain("Åben "), Span::bold("sag"), Span::plain(" følger")]
        );
    }
}
