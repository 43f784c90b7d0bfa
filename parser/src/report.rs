//! Structured reporting for one parse run.

use deal_finder_core::ProductAlternative;
use serde::{Deserialize, Serialize};

use crate::parser::ParseDiagnostics;

/// Terminal outcome of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Nested bullet blocks produced at least one record.
    Structured,
    /// The flat positional scan produced at least one record.
    Fallback,
    /// No recognizable alternatives (including absent input).
    Empty,
}

impl std::fmt::Display for ParseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Structured => write!(f, "structured"),
            Self::Fallback => write!(f, "fallback"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Machine-readable summary of a parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    pub outcome: ParseOutcome,
    pub alternative_count: usize,
    pub strategies_tried: Vec<String>,
    pub blocks_found: usize,
    pub blocks_dropped: usize,
    pub titles_found: usize,
    pub urls_found: usize,
    pub heading_skipped: bool,
    pub synthesized_titles: usize,
    pub warnings: Vec<String>,
}

impl ParseReport {
    pub fn from_diagnostics(
        outcome: ParseOutcome,
        alternative_count: usize,
        diagnostics: &ParseDiagnostics,
    ) -> Self {
        Self {
            outcome,
            alternative_count,
            strategies_tried: diagnostics.strategies_tried.clone(),
            blocks_found: diagnostics.blocks_found,
            blocks_dropped: diagnostics.blocks_dropped,
            titles_found: diagnostics.titles_found,
            urls_found: diagnostics.urls_found,
            heading_skipped: diagnostics.heading_skipped,
            synthesized_titles: diagnostics.synthesized_titles,
            warnings: diagnostics.warnings(),
        }
    }
}

/// Alternatives together with the report describing how they were found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRun {
    pub alternatives: Vec<ProductAlternative>,
    pub report: ParseReport,
}
