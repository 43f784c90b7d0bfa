//! Product alternative extraction from free-text agent replies.
//!
//! The deal-finder agent answers in loosely formatted markdown. This crate
//! turns that text into typed [`ProductAlternative`] records, preferring the
//! nested bullet layout and falling back to a positional scan of labeled
//! fields when the layout is missing.
//!
//! # Main entry points
//!
//! - [`parse_alternatives`] — parse reply text; never fails.
//! - [`parse_alternatives_with_report`] — same, plus a [`ParseReport`]
//!   describing which strategy matched and what was dropped.
//! - [`reply::alternatives_from_message`] — resolve an assistant message,
//!   preferring tool-call payloads over its text.
//!
//! # Example
//!
//! ```
//! use deal_finder_parser::parse_alternatives;
//!
//! let reply = "\n*   **Wireless Mouse**\n    *   Link: https://example.com/a\n    *   Price: $19.99\n    *   Source: Target";
//!
//! let found = parse_alternatives(Some(reply));
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].title, "Wireless Mouse");
//! assert_eq!(found[0].url, "https://example.com/a");
//! assert_eq!(found[0].price.as_deref(), Some("$19.99"));
//! assert_eq!(found[0].source.as_deref(), Some("Target"));
//! ```
//!
//! [`ProductAlternative`]: deal_finder_core::ProductAlternative

pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod prompt;
pub mod reply;
pub mod report;

use deal_finder_core::ProductAlternative;

pub use config::{FinderConfig, ParserConfig};
pub use error::{FinderError, Result};
pub use parser::AlternativesParser;
pub use report::{ParseOutcome, ParseReport, ParseRun};

/// Parses an assistant reply into alternatives using the default config.
///
/// `None` and empty text yield an empty vector, as does text with no
/// recognizable alternatives.
///
/// # Examples
///
/// ```
/// use deal_finder_parser::parse_alternatives;
///
/// assert!(parse_alternatives(None).is_empty());
///
/// let reply = "**Great Deals:** Check out **Mouse** Link: https://x.com/1 Price: $10 **Keyboard** Link: https://x.com/2 Price: $20";
/// let titles: Vec<_> = parse_alternatives(Some(reply))
///     .into_iter()
///     .map(|alt| alt.title)
///     .collect();
/// assert_eq!(titles, ["Mouse", "Keyboard"]);
/// ```
pub fn parse_alternatives(content: Option<&str>) -> Vec<ProductAlternative> {
    AlternativesParser::new(content, ParserConfig::default()).parse()
}

/// Parses an assistant reply and reports how the result was obtained.
///
/// # Examples
///
/// ```
/// use deal_finder_parser::{ParseOutcome, ParserConfig, parse_alternatives_with_report};
///
/// let run = parse_alternatives_with_report(Some("Link: https://x.com/1"), &ParserConfig::default());
/// assert_eq!(run.report.outcome, ParseOutcome::Fallback);
/// assert_eq!(run.alternatives[0].title, "Product 1");
/// assert_eq!(run.report.synthesized_titles, 1);
/// ```
pub fn parse_alternatives_with_report(content: Option<&str>, config: &ParserConfig) -> ParseRun {
    let mut parser = AlternativesParser::new(content, *config);
    let alternatives = parser.parse();
    let outcome = parser.outcome().unwrap_or(ParseOutcome::Empty);
    let report = ParseReport::from_diagnostics(outcome, alternatives.len(), parser.diagnostics());

    ParseRun {
        alternatives,
        report,
    }
}
