//! Nested bullet-block strategy.
//!
//! Handles the agent's preferred shape:
//!
//! ```text
//! *   **Product Title**
//!     *   Link: https://...
//!     *   Price: $24.99
//!     *   Source: Target
//! ```

use deal_finder_core::ProductAlternative;
use tracing::debug;

use super::ExtractionStrategy;
use crate::config::ParserConfig;
use crate::parser::diagnostics::ParseDiagnostics;
use crate::parser::rules::{FieldRule, split_titled_blocks};
use crate::report::ParseOutcome;

pub struct StructuredStrategy;

impl ExtractionStrategy for StructuredStrategy {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn outcome(&self) -> ParseOutcome {
        ParseOutcome::Structured
    }

    fn extract(
        &self,
        content: &str,
        _config: &ParserConfig,
        diagnostics: &mut ParseDiagnostics,
    ) -> Vec<ProductAlternative> {
        let blocks = split_titled_blocks(content);
        diagnostics.blocks_found = blocks.len();

        let mut alternatives = Vec::with_capacity(blocks.len());
        for (idx, block) in blocks.iter().enumerate() {
            let title = block.title.trim();
            let Some(url) = FieldRule::Url
                .first(block.body)
                .filter(|_| !title.is_empty())
            else {
                debug!(block = idx, title, "Dropping titled block without title or link");
                diagnostics.blocks_dropped += 1;
                continue;
            };

            alternatives.push(ProductAlternative {
                title: title.to_string(),
                url,
                price: FieldRule::Price.first(block.body),
                source: FieldRule::Source.first(block.body),
            });
        }

        alternatives
    }
}
