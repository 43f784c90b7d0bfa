//! Alternatives parser for free-text assistant replies.
//!
//! The agent is asked for a list of product alternatives but answers in
//! loosely formatted markdown. This module recovers typed records from the
//! shapes it is known to produce:
//!
//! - **Structured** — bulleted items with a bold title and an indented list
//!   of `Link:` / `Price:` / `Source:` fields.
//! - **Flat** — titles, links, prices, and sources scattered through
//!   paragraphs or numbered lists, zipped back together by position.
//!
//! # Architecture
//!
//! Strategies run in priority order (see [`strategies::ranked_strategies`])
//! and share one table of field rules, so both read fields the same way. The
//! first strategy that yields a record wins. An empty result is a normal
//! outcome, not an error.
//!
//! Most consumers should call [`parse_alternatives`](crate::parse_alternatives)
//! instead of driving [`AlternativesParser`] directly.

mod diagnostics;
pub mod rules;
pub mod strategies;

use deal_finder_core::ProductAlternative;
use tracing::debug;

use crate::config::ParserConfig;
use crate::report::ParseOutcome;
use strategies::ranked_strategies;

pub use diagnostics::ParseDiagnostics;

/// Parser for one assistant reply.
///
/// # Examples
///
/// ```
/// use deal_finder_parser::{AlternativesParser, ParseOutcome, ParserConfig};
///
/// let reply = "Sure!\n*   **Desk Lamp**\n    *   Link: https://shop.test/lamp\n    *   Price: $18";
/// let mut parser = AlternativesParser::new(Some(reply), ParserConfig::default());
/// let found = parser.parse();
///
/// assert_eq!(found[0].title, "Desk Lamp");
/// assert_eq!(parser.outcome(), Some(ParseOutcome::Structured));
/// ```
pub struct AlternativesParser {
    content: Option<String>,
    config: ParserConfig,
    outcome: Option<ParseOutcome>,
    diagnostics: ParseDiagnostics,
}

impl AlternativesParser {
    /// Creates a parser for `content`; `None` means the reply had no text.
    pub fn new(content: Option<&str>, config: ParserConfig) -> Self {
        Self {
            content: content.map(str::to_string),
            config,
            outcome: None,
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Runs the strategy cascade and returns alternatives in discovery order.
    ///
    /// Never fails: absent, empty, or unrecognizable content yields an empty
    /// vector. Calling `parse` again re-runs from scratch and returns an equal
    /// result.
    pub fn parse(&mut self) -> Vec<ProductAlternative> {
        self.diagnostics = ParseDiagnostics::default();

        let Some(content) = self.content.as_deref().filter(|text| !text.is_empty()) else {
            self.outcome = Some(ParseOutcome::Empty);
            return Vec::new();
        };

        for strategy in ranked_strategies() {
            self.diagnostics
                .strategies_tried
                .push(strategy.name().to_string());

            let found = strategy.extract(content, &self.config, &mut self.diagnostics);
            if !found.is_empty() {
                debug!(
                    strategy = strategy.name(),
                    count = found.len(),
                    "Extracted alternatives"
                );
                self.outcome = Some(strategy.outcome());
                return found;
            }
        }

        debug!(
            strategies = ?self.diagnostics.strategies_tried,
            "No alternatives recognized in reply"
        );
        self.outcome = Some(ParseOutcome::Empty);
        Vec::new()
    }

    /// Terminal outcome of the last [`parse`](Self::parse) call.
    pub fn outcome(&self) -> Option<ParseOutcome> {
        self.outcome
    }

    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }

    pub fn warnings(&self) -> Vec<String> {
        self.diagnostics.warnings()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: Option<&str>) -> (Vec<ProductAlternative>, AlternativesParser) {
        let mut parser = AlternativesParser::new(content, ParserConfig::default());
        let found = parser.parse();
        (found, parser)
    }

    #[test]
    fn test_absent_content_is_empty() {
        let (found, parser) = parse(None);
        assert!(found.is_empty());
        assert_eq!(parser.outcome(), Some(ParseOutcome::Empty));
        assert!(parser.diagnostics().strategies_tried.is_empty());
    }

    #[test]
    fn test_empty_content_is_empty() {
        let (found, _) = parse(Some(""));
        assert!(found.is_empty());
    }

    #[test]
    fn test_outcome_is_none_before_parse() {
        let parser = AlternativesParser::new(Some("x"), ParserConfig::default());
        assert_eq!(parser.outcome(), None);
    }

    #[test]
    fn test_structured_wins_over_flat() {
        let content = "**Intro heading**\n*   **Mouse**\n    *   Link: https://x.com/m";
        let (found, parser) = parse(Some(content));

        assert_eq!(found, vec![ProductAlternative::new("Mouse", "https://x.com/m")]);
        assert_eq!(parser.outcome(), Some(ParseOutcome::Structured));
        assert_eq!(parser.diagnostics().strategies_tried, vec!["structured"]);
    }

    #[test]
    fn test_leading_delimiter_keeps_fields_with_their_block() {
        let content = "\n* **A**\n  * Link: https://a\n  * Source: S\n* **B**\n  * Link: https://b\n  * Price: $2";
        let (found, parser) = parse(Some(content));

        assert_eq!(parser.outcome(), Some(ParseOutcome::Structured));
        assert_eq!(
            found,
            vec![
                ProductAlternative::new("A", "https://a").with_source("S"),
                ProductAlternative::new("B", "https://b").with_price("$2"),
            ]
        );
    }

    #[test]
    fn test_falls_back_to_flat_without_blocks() {
        let (found, parser) = parse(Some("Try **Mouse**, Link: https://x.com/m"));
        assert_eq!(parser.outcome(), Some(ParseOutcome::Fallback));
        assert_eq!(parser.diagnostics().strategies_tried, vec!["structured", "flat"]);
        assert_eq!(found[0].title, "Mouse");
    }

    #[test]
    fn test_falls_back_when_no_block_has_a_link() {
        // Links outside any block body are still picked up by the flat scan.
        let content = "**Alternatives** Link: https://x.com/top\n*   **Mouse**\n    *   Price: $10";
        let (found, parser) = parse(Some(content));
        assert_eq!(parser.outcome(), Some(ParseOutcome::Fallback));
        assert_eq!(parser.diagnostics().blocks_dropped, 1);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].url, "https://x.com/top");
    }

    #[test]
    fn test_unrecognized_text_is_empty_after_both_strategies() {
        let (found, parser) = parse(Some("I could not find any alternatives, sorry."));
        assert!(found.is_empty());
        assert_eq!(parser.outcome(), Some(ParseOutcome::Empty));
        assert_eq!(parser.diagnostics().strategies_tried.len(), 2);
    }

    #[test]
    fn test_reparse_resets_diagnostics() {
        let mut parser = AlternativesParser::new(Some("Link: https://a"), ParserConfig::default());
        let first = parser.parse();
        let second = parser.parse();
        assert_eq!(first, second);
        assert_eq!(parser.diagnostics().strategies_tried.len(), 2);
        assert_eq!(parser.diagnostics().synthesized_titles, 1);
    }

    #[test]
    fn test_custom_heading_threshold() {
        let content = "**Top picks for you**: **Mouse** Link: https://x.com/m";
        let strict = ParserConfig {
            heading_max_chars: 5,
        };
        let mut parser = AlternativesParser::new(Some(content), strict);
        let found = parser.parse();
        assert_eq!(found[0].title, "Top picks for you");

        let (found, _) = parse(Some(content));
        assert_eq!(found[0].title, "Mouse");
    }
}
