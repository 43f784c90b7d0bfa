//! Prompt and response-schema builders for the deal-finder agent.

use deal_finder_core::ProductContext;
use serde_json::{Value, json};

const PROMPT_PREAMBLE: &str = "Find better or similar product alternatives for this product:";

/// Builds the user message sent to the agent for `product`.
///
/// Empty context fields are left out.
///
/// # Examples
///
/// ```
/// use deal_finder_core::ProductContext;
/// use deal_finder_parser::prompt::build_user_prompt;
///
/// let product = ProductContext {
///     title: "USB-C Hub".into(),
///     price: "$39.99".into(),
///     ..Default::default()
/// };
/// assert_eq!(
///     build_user_prompt(&product),
///     "Find better or similar product alternatives for this product:\n\nTitle: USB-C Hub\nPrice: $39.99"
/// );
/// ```
pub fn build_user_prompt(product: &ProductContext) -> String {
    let lines: Vec<String> = [
        ("Title", &product.title),
        ("Price", &product.price),
        ("Category/specs", &product.category_or_specs),
        ("Page URL", &product.current_url),
    ]
    .into_iter()
    .filter(|(_, value)| !value.is_empty())
    .map(|(label, value)| format!("{label}: {value}"))
    .collect();

    format!("{PROMPT_PREAMBLE}\n\n{}", lines.join("\n"))
}

/// Builds the self-contained instructions used when the model is called
/// directly with web search, outside the conversational agent.
///
/// Unlike [`build_user_prompt`], every field is listed; empty ones read
/// `unknown`.
///
/// # Examples
///
/// ```
/// use deal_finder_core::ProductContext;
/// use deal_finder_parser::prompt::build_agent_instructions;
///
/// let product = ProductContext {
///     title: "USB-C Hub".into(),
///     ..Default::default()
/// };
/// let instructions = build_agent_instructions(&product);
/// assert!(instructions.contains("- Title: USB-C Hub\n- Price: unknown\n"));
/// ```
pub fn build_agent_instructions(product: &ProductContext) -> String {
    format!(
        "You are a shopping assistant. Find 3-5 real product alternatives that are comparable to what the user is viewing. Prefer similar or better value (same or lower price, similar specs for electronics, or similar style/size for apparel).

Current product context:
- Title: {}
- Price: {}
- Category/specs: {}
- Page URL: {}

Search the web for real, currently available products. Return a JSON object with an \"alternatives\" array. Each alternative must have: title (string), url (string, real product page URL), price (string, e.g. \"$99.99\"), source (string, retailer name). Use only real URLs you find from search; do not make up URLs.",
        or_unknown(&product.title),
        or_unknown(&product.price),
        or_unknown(&product.category_or_specs),
        or_unknown(&product.current_url),
    )
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() { "unknown" } else { value }
}

/// JSON schema the agent is asked to follow when it answers through a tool.
pub fn alternatives_response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "alternatives": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string", "description": "Product title" },
                        "url": { "type": "string", "description": "Product page URL" },
                        "price": { "type": "string", "description": "Price display string" },
                        "source": { "type": "string", "description": "Retailer/site name" }
                    },
                    "required": ["title", "url"]
                }
            }
        },
        "required": ["alternatives"]
    })
}
