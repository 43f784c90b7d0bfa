//! Wishlist flow example.
//!
//! Walks the path from a scraped product to wishlist drafts: build the agent
//! prompt, resolve the assistant message (tool payload first, text second),
//! validate the alternatives, and turn each one into a [`WishlistDraft`].
//!
//! # Usage
//!
//! ```bash
//! cargo run -p deal-finder-demos --example wishlist_flow
//! ```

use deal_finder_core::{ProductContext, WishlistDraft, validate_alternatives};
use deal_finder_parser::ParserConfig;
use deal_finder_parser::prompt::build_user_prompt;
use deal_finder_parser::reply::{ConversationMessage, alternatives_from_message};

fn main() {
    let product = ProductContext {
        title: "Vitamix E310 Explorian Blender".into(),
        price: "$349.95".into(),
        category_or_specs: "Kitchen > Blenders".into(),
        current_url: "https://www.amazon.com/dp/B0758JHZM3".into(),
        source: Some("Amazon".into()),
    };

    println!("=== Prompt ===");
    println!("{}\n", build_user_prompt(&product));

    // The tool result is missing here, so the text content is parsed instead.
    let message: ConversationMessage = match serde_json::from_value(serde_json::json!({
        "role": "assistant",
        "content": "\n*   **Ninja Professional Blender**\n    *   Link: https://www.target.com/p/-/A-333\n    *   Price: $89.99\n    *   Source: Target",
        "tool_calls": [{"results": null}]
    })) {
        Ok(message) => message,
        Err(e) => {
            eprintln!("Failed to decode message: {e}");
            return;
        }
    };

    let alternatives = alternatives_from_message(&message, &ParserConfig::default());
    let errors = validate_alternatives(&alternatives);
    if !errors.is_empty() {
        for error in errors {
            eprintln!("{error}");
        }
        return;
    }

    println!("=== Wishlist drafts ===");
    for alt in &alternatives {
        let draft = WishlistDraft::from_alternative(alt, "shopper@example.com");
        match serde_json::to_string_pretty(&draft) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to serialize draft: {e}"),
        }
    }
}
