//! Named field extraction rules shared by every strategy.
//!
//! Each [`FieldRule`] owns exactly one capture pattern. Strategies ask a rule
//! for the first match inside a block ([`FieldRule::first`]) or for every
//! match across a whole reply ([`FieldRule::all`]); neither strategy carries
//! its own pattern literals.

use regex::Regex;
use std::sync::LazyLock;

static PATTERNS: LazyLock<ReplyPatterns> = LazyLock::new(ReplyPatterns::new);

struct ReplyPatterns {
    // Block delimiter: newline, indent, bullet, bold title
    block_title: Regex,

    // Field rules
    bold: Regex,
    link: Regex,
    price: Regex,
    source: Regex,
}

impl ReplyPatterns {
    fn new() -> Self {
        // All regexes here are compile-time constants. An expect() failure indicates
        // a programmer error in the pattern, not a runtime condition.
        Self {
            // "\n    *   **Title**"
            block_title: Regex::new(r"\n\s*\*\s+\*\*([^*]+)\*\*").expect("static regex must compile"),
            // **Title**
            bold: Regex::new(r"\*\*([^*]+)\*\*").expect("static regex must compile"),
            // Link: https://...  /  URL: http://...
            link: Regex::new(r"(?i)(?:Link|URL):\s*(https?://[^\s*]+)")
                .expect("static regex must compile"),
            // Price: $24.99 (up to end of line or emphasis)
            price: Regex::new(r"(?i)Price:\s*([^\n*]+)").expect("static regex must compile"),
            // Source: Target
            source: Regex::new(r"(?i)Source:\s*([^\n*]+)").expect("static regex must compile"),
        }
    }
}

/// A labeled field that can be pulled out of reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Bold span (`**...**`) naming a product.
    Title,
    /// `Link:` or `URL:` label followed by an `http(s)://` token.
    Url,
    /// `Price:` label.
    Price,
    /// `Source:` label.
    Source,
}

impl FieldRule {
    fn regex(self) -> &'static Regex {
        let patterns = &*PATTERNS;
        match self {
            Self::Title => &patterns.bold,
            Self::Url => &patterns.link,
            Self::Price => &patterns.price,
            Self::Source => &patterns.source,
        }
    }

    /// Returns the first capture in `text`, trimmed.
    ///
    /// A capture that trims to nothing counts as no match.
    pub fn first(self, text: &str) -> Option<String> {
        self.regex()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Returns every capture in `text`, trimmed, in source order.
    ///
    /// Captures that trim to an empty string are kept so positions line up
    /// across rules.
    pub fn all(self, text: &str) -> Vec<String> {
        self.regex()
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect()
    }
}

/// One bold-titled bullet item and the text that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitledBlock<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

/// Splits `text` on bullet + bold-title delimiters.
///
/// Text before the first delimiter is discarded. Each block's body runs up to
/// the next delimiter or the end of the input, so fields cannot leak between
/// neighbouring blocks.
pub fn split_titled_blocks(text: &str) -> Vec<TitledBlock<'_>> {
    let matches: Vec<(usize, usize, &str)> = PATTERNS
        .block_title
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let title = caps.get(1)?;
            Some((whole.start(), whole.end(), title.as_str()))
        })
        .collect();

    matches
        .iter()
        .enumerate()
        .map(|(idx, &(_, end, title))| {
            let body_end = matches
                .get(idx + 1)
                .map_or(text.len(), |&(next_start, _, _)| next_start);
            TitledBlock {
                title,
                body: &text[end..body_end],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_rule_accepts_link_and_url_labels() {
        assert_eq!(
            FieldRule::Url.first("link: https://a.test/x").as_deref(),
            Some("https://a.test/x")
        );
        assert_eq!(
            FieldRule::Url.first("URL:http://b.test").as_deref(),
            Some("http://b.test")
        );
    }

    #[test]
    fn test_url_rule_stops_at_whitespace_and_asterisk() {
        assert_eq!(
            FieldRule::Url.first("Link: https://a.test/x** more").as_deref(),
            Some("https://a.test/x")
        );
        assert_eq!(
            FieldRule::Url.first("Link: https://a.test/y\nPrice: $1").as_deref(),
            Some("https://a.test/y")
        );
    }

    #[test]
    fn test_url_rule_requires_http_scheme() {
        assert_eq!(FieldRule::Url.first("Link: ftp://a.test"), None);
        assert_eq!(FieldRule::Url.first("Link: www.a.test"), None);
    }

    #[test]
    fn test_price_rule_stops_at_newline_and_trims() {
        assert_eq!(
            FieldRule::Price.first("PRICE:   $24.99  \nSource: Target").as_deref(),
            Some("$24.99")
        );
    }

    #[test]
    fn test_price_rule_stops_at_asterisk() {
        assert_eq!(
            FieldRule::Price.first("Price: $10 **Keyboard**").as_deref(),
            Some("$10")
        );
    }

    #[test]
    fn test_blank_capture_is_no_match() {
        assert_eq!(FieldRule::Source.first("Source: *"), None);
    }

    #[test]
    fn test_all_collects_every_occurrence_in_order() {
        let text = "Price: $1\nPrice: $2\nprice: $3";
        assert_eq!(FieldRule::Price.all(text), vec!["$1", "$2", "$3"]);
    }

    #[test]
    fn test_title_rule_trims_bold_text() {
        assert_eq!(
            FieldRule::Title.all("**  Mouse ** and **Keyboard**"),
            vec!["Mouse", "Keyboard"]
        );
    }

    #[test]
    fn test_split_discards_preamble() {
        let text = "Here you go:\n* **A**\n  * Link: https://a\n* **B**\n  * Link: https://b";
        let blocks = split_titled_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].title, "A");
        assert!(blocks[0].body.contains("https://a"));
        assert!(!blocks[0].body.contains("https://b"));
        assert_eq!(blocks[1].title, "B");
    }

    #[test]
    fn test_split_without_delimiter_is_empty() {
        assert!(split_titled_blocks("**A** Link: https://a").is_empty());
        assert!(split_titled_blocks("").is_empty());
    }

    #[test]
    fn test_split_handles_leading_newline() {
        let blocks = split_titled_blocks("\n*   **Only**\n    *   Link: https://o");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].title, "Only");
    }
}
