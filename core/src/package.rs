use serde::{Deserialize, Serialize};

use crate::ProductAlternative;

/// Serializable bundle of alternatives parsed from one reply.
///
/// Batch runs emit one set per input so results can be traced back to the
/// reply they came from.
///
/// # Examples
///
/// ```
/// use deal_finder_core::*;
///
/// let mut set = AlternativeSet::new("2026-01-15T10:30:00Z");
/// set.label = Some("reply-01".into());
/// set.alternatives.push(ProductAlternative::new("Mouse", "https://x.com/1"));
///
/// assert_eq!(set.alternative_count(), 1);
/// assert_eq!(set.schema_version.as_deref(), Some(ALTERNATIVES_CONTRACT_VERSION));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeSet {
    /// Contract version (populated from
    /// [`ALTERNATIVES_CONTRACT_VERSION`](crate::ALTERNATIVES_CONTRACT_VERSION)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    /// Optional label identifying the source reply.
    pub label: Option<String>,
    /// ISO-8601 timestamp for set creation.
    pub generated_at: String,
    /// Alternatives in discovery order.
    pub alternatives: Vec<ProductAlternative>,
}

impl AlternativeSet {
    /// Creates an empty set stamped with `generated_at`.
    pub fn new(generated_at: impl Into<String>) -> Self {
        Self {
            schema_version: Some(crate::ALTERNATIVES_CONTRACT_VERSION.to_string()),
            label: None,
            generated_at: generated_at.into(),
            alternatives: Vec::new(),
        }
    }

    /// Returns the number of alternatives in this set.
    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }
}
