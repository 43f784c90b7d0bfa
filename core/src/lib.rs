//! Core record types for product alternatives.
//!
//! This crate defines the data shared by every part of the deal finder:
//!
//! - [`ProductAlternative`] — one suggested substitute product (title, url,
//!   optional price and source).
//! - [`ProductContext`] — the product the user is currently viewing.
//! - [`AgentReply`] — assistant output decoded into either a tool-call payload
//!   or plain text.
//! - [`WishlistDraft`] — the payload stored when a user saves an alternative.
//! - [`AlternativeSet`] — a versioned bundle of alternatives for batch output.
//!
//! Validation ([`validate_alternative`], [`validate_alternatives`]) catches
//! empty required fields and URLs without an `http(s)://` prefix.
//!
//! # Example
//!
//! ```
//! use deal_finder_core::*;
//!
//! let alt = ProductAlternative::new("Wireless Mouse", "https://example.com/a")
//!     .with_price("$19.99");
//! assert!(validate_alternative(&alt).is_empty());
//!
//! let draft = WishlistDraft::from_alternative(&alt, "shopper@example.com");
//! assert_eq!(draft.source_site, "");
//! ```

mod package;
mod types;
mod validate;

pub use package::AlternativeSet;
pub use types::*;
pub use validate::{ValidationError, validate_alternative, validate_alternatives};
