//! Output formatting for alternatives and parse reports.

use deal_finder_core::ProductAlternative;
use serde::{Deserialize, Serialize};

use crate::report::ParseReport;

const EMPTY_MESSAGE: &str = "No alternatives found.";

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats alternatives in the requested output format.
///
/// Markdown output uses the nested bullet layout the parser reads, so it can
/// be fed back through [`parse_alternatives`](crate::parse_alternatives).
pub fn format_alternatives(
    alternatives: &[ProductAlternative],
    format: OutputFormat,
) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(alternatives)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(alternatives)
            .map_err(|e| format!("YAML serialization failed: {e}")),
        OutputFormat::Markdown => Ok(alternatives_to_markdown(alternatives)),
        OutputFormat::Table => Ok(alternatives_to_table(alternatives)),
    }
}

/// Formats a parse report in the requested output format.
pub fn format_report(report: &ParseReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

fn alternatives_to_markdown(alternatives: &[ProductAlternative]) -> String {
    let mut out = String::new();

    out.push_str("## Alternatives\n\n");
    if alternatives.is_empty() {
        out.push_str(&format!("{EMPTY_MESSAGE}\n"));
        return out;
    }

    for alt in alternatives {
        out.push_str(&format!("*   **{}**\n", alt.title));
        out.push_str(&format!("    *   Link: {}\n", alt.url));
        if let Some(ref price) = alt.price {
            out.push_str(&format!("    *   Price: {price}\n"));
        }
        if let Some(ref source) = alt.source {
            out.push_str(&format!("    *   Source: {source}\n"));
        }
    }

    out
}

fn alternatives_to_table(alternatives: &[ProductAlternative]) -> String {
    if alternatives.is_empty() {
        return format!("{EMPTY_MESSAGE}\n");
    }

    let rows: Vec<[&str; 4]> = alternatives
        .iter()
        .map(|alt| {
            [
                alt.title.as_str(),
                alt.price.as_deref().unwrap_or("-"),
                alt.source.as_deref().unwrap_or("-"),
                alt.url.as_str(),
            ]
        })
        .collect();

    let header = ["TITLE", "PRICE", "SOURCE", "URL"];
    let mut widths = header.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(&header).chain(rows.iter()) {
        let line = format!(
            "{:<w0$}  {:<w1$}  {:<w2$}  {}",
            row[0],
            row[1],
            row[2],
            row[3],
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

fn report_to_markdown(report: &ParseReport) -> String {
    let mut out = String::new();

    out.push_str("# Parse Report\n\n");
    out.push_str(&format!("- **Outcome:** {}\n", report.outcome));
    out.push_str(&format!("- **Alternatives:** {}\n", report.alternative_count));
    out.push_str(&format!(
        "- **Strategies:** {}\n",
        report.strategies_tried.join(", ")
    ));
    out.push_str(&format!(
        "- **Blocks:** {} found, {} dropped\n",
        report.blocks_found, report.blocks_dropped
    ));
    out.push_str(&format!(
        "- **Flat scan:** {} titles, {} links\n",
        report.titles_found, report.urls_found
    ));

    if !report.warnings.is_empty() {
        out.push_str("\n## Warnings\n\n");
        for w in &report.warnings {
            out.push_str(&format!("- {w}\n"));
        }
    }

    out
}

fn report_to_table(report: &ParseReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Outcome: {}  Alternatives: {}\n",
        report.outcome, report.alternative_count
    ));
    out.push_str(&format!(
        "  strategies  {}\n",
        report.strategies_tried.join(", ")
    ));
    out.push_str(&format!(
        "  blocks      {} found, {} dropped\n",
        report.blocks_found, report.blocks_dropped
    ));
    out.push_str(&format!(
        "  flat scan   {} titles, {} links\n",
        report.titles_found, report.urls_found
    ));
    for w in &report.warnings {
        out.push_str(&format!("  warning     {w}\n"));
    }

    out
}
