//! Record types for product alternatives and the replies they are parsed from.
//!
//! This module defines the data model shared by the parser, the CLI, and the
//! wishlist boundary. The types serialize with [`serde`] in the same shape the
//! browser extension exchanges over its message channel.

use serde::{Deserialize, Serialize};

/// Version of the alternatives contract (semver).
///
/// Embedded in every [`AlternativeSet`](crate::AlternativeSet) to track
/// compatibility of serialized batches.
pub const ALTERNATIVES_CONTRACT_VERSION: &str = "1.0.0";

/// One suggested substitute product.
///
/// `title` and `url` are always non-empty when produced by the parser.
/// `price` and `source` are free-form display strings and stay `None` when the
/// reply did not mention them.
///
/// # Examples
///
/// ```
/// use deal_finder_core::ProductAlternative;
///
/// let alt = ProductAlternative::new("Wireless Mouse", "https://example.com/a")
///     .with_price("$19.99")
///     .with_source("Target");
/// assert_eq!(alt.price.as_deref(), Some("$19.99"));
/// assert!(alt.has_required_fields());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAlternative {
    /// Display name of the candidate product.
    pub title: String,
    /// Product page URL, expected to start with `http://` or `https://`.
    pub url: String,
    /// Price display string (e.g. `"$24.99"`), never parsed into a number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Retailer name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl ProductAlternative {
    /// Creates a record with only the required fields set.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            price: None,
            source: None,
        }
    }

    /// Sets the price display string.
    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Sets the retailer name.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns `true` when both `title` and `url` are non-empty.
    pub fn has_required_fields(&self) -> bool {
        !self.title.is_empty() && !self.url.is_empty()
    }
}

/// Product scraped from the retailer page the user is viewing.
///
/// Field names serialize in camelCase to match the payload the content script
/// sends to the background worker.
///
/// # Examples
///
/// ```
/// use deal_finder_core::ProductContext;
///
/// let ctx: ProductContext = serde_json::from_str(
///     r#"{"title":"USB Hub","price":"$30","categoryOrSpecs":"","currentUrl":"https://shop.test/hub"}"#,
/// ).unwrap();
/// assert_eq!(ctx.current_url, "https://shop.test/hub");
/// assert!(ctx.source.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductContext {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub category_or_specs: String,
    #[serde(default)]
    pub current_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// One unit of assistant output, decoded once at the integration boundary.
///
/// The agent service returns messages with an optional text `content` and an
/// optional list of tool calls. Each usable part becomes one `AgentReply`, so
/// the parser only ever deals with either a JSON payload or plain text.
///
/// # Examples
///
/// ```
/// use deal_finder_core::AgentReply;
///
/// let reply: AgentReply = serde_json::from_str(r#"{"kind":"text","text":"hello"}"#).unwrap();
/// assert_eq!(reply.as_text(), Some("hello"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AgentReply {
    /// Structured result returned by an agent tool call.
    ToolResult { payload: serde_json::Value },
    /// Free-text assistant content.
    Text { text: String },
}

impl AgentReply {
    /// Returns the text body for [`AgentReply::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text.as_str()),
            Self::ToolResult { .. } => None,
        }
    }

    /// Returns the JSON payload for [`AgentReply::ToolResult`].
    pub fn as_payload(&self) -> Option<&serde_json::Value> {
        match self {
            Self::ToolResult { payload } => Some(payload),
            Self::Text { .. } => None,
        }
    }
}

/// Record handed to the wishlist store when the user saves an alternative.
///
/// Optional fields of the alternative are flattened to empty strings here,
/// which is what the store expects.
///
/// # Examples
///
/// ```
/// use deal_finder_core::{ProductAlternative, WishlistDraft};
///
/// let alt = ProductAlternative::new("Desk Lamp", "https://example.com/lamp");
/// let draft = WishlistDraft::from_alternative(&alt, "me@example.com");
/// assert_eq!(draft.product_title, "Desk Lamp");
/// assert_eq!(draft.price, "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistDraft {
    pub product_title: String,
    pub product_url: String,
    pub price: String,
    pub source_site: String,
    pub created_by: String,
}

impl WishlistDraft {
    /// Builds a draft for `alternative` owned by `created_by`.
    pub fn from_alternative(alternative: &ProductAlternative, created_by: &str) -> Self {
        Self {
            product_title: alternative.title.clone(),
            product_url: alternative.url.clone(),
            price: alternative.price.clone().unwrap_or_default(),
            source_site: alternative.source.clone().unwrap_or_default(),
            created_by: created_by.to_string(),
        }
    }
}
