//! Reply parsing example.
//!
//! Parses the two reply shapes the agent produces and prints the parse report
//! for each.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p deal-finder-demos --example parse_reply
//! ```

use deal_finder_parser::output::{OutputFormat, format_alternatives, format_report};
use deal_finder_parser::{ParserConfig, parse_alternatives_with_report};

const STRUCTURED_REPLY: &str = "Here are a few options:
*   **Logitech M510 Wireless Mouse**
    *   Link: https://www.amazon.com/dp/B003NR57BY
    *   Price: $24.99
    *   Source: Amazon
*   **Razer Basilisk X HyperSpeed**
    *   Link: https://www.bestbuy.com/site/6430620.p
    *   Price: $39.99
    *   Source: Best Buy
";

const FLAT_REPLY: &str = "**Great Deals:** Check out **Mouse** Link: https://x.com/1 Price: $10 **Keyboard** Link: https://x.com/2 Price: $20";

fn main() {
    let config = ParserConfig::default();

    for (label, reply) in [("structured", STRUCTURED_REPLY), ("flat", FLAT_REPLY)] {
        println!("=== {label} reply ===");
        let run = parse_alternatives_with_report(Some(reply), &config);

        match format_alternatives(&run.alternatives, OutputFormat::Table) {
            Ok(table) => print!("{table}"),
            Err(e) => eprintln!("Failed to format alternatives: {e}"),
        }
        match format_report(&run.report, OutputFormat::Table) {
            Ok(report) => print!("{report}"),
            Err(e) => eprintln!("Failed to format report: {e}"),
        }
        println!();
    }
}
