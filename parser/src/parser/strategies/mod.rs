//! Extraction strategies for the reply shapes the agent produces.

pub mod flat;
pub mod structured;

use deal_finder_core::ProductAlternative;

use super::diagnostics::ParseDiagnostics;
use crate::config::ParserConfig;
use crate::report::ParseOutcome;

use flat::FlatStrategy;
use structured::StructuredStrategy;

/// Pluggable strategy for pulling alternatives out of reply text.
///
/// Strategies run in the order given by [`ranked_strategies`]; the first one
/// that yields at least one record wins.
pub trait ExtractionStrategy {
    fn name(&self) -> &'static str;
    /// Terminal outcome reported when this strategy produced the result.
    fn outcome(&self) -> ParseOutcome;
    fn extract(
        &self,
        content: &str,
        config: &ParserConfig,
        diagnostics: &mut ParseDiagnostics,
    ) -> Vec<ProductAlternative>;
}

/// Returns strategies in priority order.
///
/// Nested bullet blocks are preferred; the flat positional scan only runs
/// when no block produced a record.
pub fn ranked_strategies() -> [&'static dyn ExtractionStrategy; 2] {
    [&StructuredStrategy, &FlatStrategy]
}
