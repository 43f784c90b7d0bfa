//! Flat positional strategy for replies without nested bullet blocks.
//!
//! Every bold span, link, price, and source in the reply is collected
//! independently and the lists are zipped by position. The link list decides
//! how many records come out.

use deal_finder_core::ProductAlternative;
use tracing::debug;

use super::ExtractionStrategy;
use crate::config::ParserConfig;
use crate::parser::diagnostics::ParseDiagnostics;
use crate::parser::rules::FieldRule;
use crate::report::ParseOutcome;

pub struct FlatStrategy;

impl ExtractionStrategy for FlatStrategy {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn outcome(&self) -> ParseOutcome {
        ParseOutcome::Fallback
    }

    fn extract(
        &self,
        content: &str,
        config: &ParserConfig,
        diagnostics: &mut ParseDiagnostics,
    ) -> Vec<ProductAlternative> {
        let titles = FieldRule::Title.all(content);
        let urls = FieldRule::Url.all(content);
        let prices = FieldRule::Price.all(content);
        let sources = FieldRule::Source.all(content);

        diagnostics.titles_found = titles.len();
        diagnostics.urls_found = urls.len();

        let skip_heading = looks_like_heading(&titles, urls.len(), config.heading_max_chars);
        if skip_heading {
            debug!(heading = %titles[0], "Treating first bold span as a heading");
            diagnostics.heading_skipped = true;
        }
        let offset = usize::from(skip_heading);

        let mut alternatives = Vec::with_capacity(urls.len());
        for (idx, url) in urls.into_iter().enumerate() {
            let title = match titles.get(offset + idx).filter(|title| !title.is_empty()) {
                Some(title) => title.clone(),
                None => {
                    diagnostics.synthesized_titles += 1;
                    format!("Product {}", idx + 1)
                }
            };

            alternatives.push(ProductAlternative {
                title,
                url,
                price: non_empty_at(&prices, idx),
                source: non_empty_at(&sources, idx),
            });
        }

        alternatives
    }
}

/// Returns `true` when the first bold span is probably a section heading
/// (e.g. `**Alternatives:**`) rather than a product name.
///
/// Applies only when there are strictly more bold spans than links and the
/// first span is shorter than `max_chars`. Length is counted in UTF-16 code
/// units, matching how the browser extension measured it.
fn looks_like_heading(titles: &[String], url_count: usize, max_chars: usize) -> bool {
    titles.len() > url_count
        && titles
            .first()
            .is_some_and(|first| first.encode_utf16().count() < max_chars)
}

fn non_empty_at(values: &[String], idx: usize) -> Option<String> {
    values.get(idx).filter(|value| !value.is_empty()).cloned()
}
