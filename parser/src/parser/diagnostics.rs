//! Diagnostics collected while a reply is parsed.

/// Counters and flags recorded by the strategies during one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseDiagnostics {
    /// Strategy names in the order they ran.
    pub strategies_tried: Vec<String>,
    /// Bold-titled blocks found by the structured split.
    pub blocks_found: usize,
    /// Blocks dropped for an empty title or a missing link.
    pub blocks_dropped: usize,
    /// Bold spans seen by the flat scan.
    pub titles_found: usize,
    /// Links seen by the flat scan.
    pub urls_found: usize,
    /// Whether the flat scan skipped a leading bold heading.
    pub heading_skipped: bool,
    /// Records that received a `Product {n}` placeholder title.
    pub synthesized_titles: usize,
}

impl ParseDiagnostics {
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.blocks_dropped > 0 {
            warnings.push(format!(
                "Dropped {} of {} titled blocks without a title or link",
                self.blocks_dropped, self.blocks_found
            ));
        }

        if self.heading_skipped {
            warnings.push("Skipped leading bold span as a section heading".to_string());
        }

        if self.synthesized_titles > 0 {
            warnings.push(format!(
                "Synthesized placeholder titles for {} links",
                self.synthesized_titles
            ));
        }

        if self.urls_found == 0 && self.titles_found > 0 {
            warnings.push(format!(
                "Found {} bold spans but no links",
                self.titles_found
            ));
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_parse_has_no_warnings() {
        let diagnostics = ParseDiagnostics {
            blocks_found: 3,
            ..Default::default()
        };
        assert!(diagnostics.warnings().is_empty());
    }

    #[test]
    fn test_warnings_mention_dropped_blocks_and_placeholders() {
        let diagnostics = ParseDiagnostics {
            blocks_found: 3,
            blocks_dropped: 1,
            urls_found: 2,
            synthesized_titles: 2,
            ..Default::default()
        };
        let warnings = diagnostics.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("1 of 3"));
        assert!(warnings[1].contains("2 links"));
    }
}
