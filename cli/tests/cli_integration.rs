//! Integration tests for the deal-finder binary.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

fn deal_finder_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_deal-finder"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("parser")
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run(args: &[&str]) -> std::process::Output {
    Command::new(deal_finder_bin())
        .args(args)
        .output()
        .expect("failed to run deal-finder")
}

fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "deal-finder failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("Invalid JSON output: {e}\n{stdout}"))
}

// ---- parse-file / parse-stdin ----

#[test]
fn test_parse_file_json_output() {
    let input = fixture("structured-reply.md");
    let output = run(&["parse-file", "--input", input.to_str().unwrap()]);

    let parsed = stdout_json(&output);
    let items = parsed.as_array().expect("output should be an array");
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["title"], "Logitech M510 Wireless Mouse");
    assert_eq!(items[2]["source"], "Best Buy");
}

#[test]
fn test_parse_file_with_report() {
    let input = fixture("missing-link.md");
    let output = run(&[
        "parse-file",
        "--with-report",
        "--input",
        input.to_str().unwrap(),
    ]);

    let parsed = stdout_json(&output);
    assert_eq!(parsed["report"]["outcome"], "structured");
    assert_eq!(parsed["report"]["blocks_dropped"], 1);
    assert_eq!(parsed["alternatives"].as_array().unwrap().len(), 2);
}

#[test]
fn test_parse_file_markdown_output() {
    let input = fixture("heading-flat.md");
    let output = run(&[
        "parse-file",
        "--format",
        "markdown",
        "--input",
        input.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("*   **Hamilton Beach 1.7L Electric Kettle**"));
    assert!(!stdout.contains("Budget Picks"));
}

#[test]
fn test_parse_stdin_flat_reply() {
    let mut child = Command::new(deal_finder_bin())
        .arg("parse-stdin")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn deal-finder");

    child
        .stdin
        .take()
        .expect("stdin should be piped")
        .write_all(b"**Great Deals:** Check out **Mouse** Link: https://x.com/1 Price: $10 **Keyboard** Link: https://x.com/2 Price: $20")
        .expect("failed to write stdin");

    let output = child.wait_with_output().expect("failed to wait on deal-finder");
    let parsed = stdout_json(&output);
    assert_eq!(parsed[0]["title"], "Mouse");
    assert_eq!(parsed[1]["title"], "Keyboard");
    assert_eq!(parsed[1]["price"], "$20");
}

#[test]
fn test_config_file_sets_default_format() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("deal-finder.yml");
    fs::write(&config, "output:\n  format: table\n").unwrap();

    let input = fixture("no-alternatives.md");
    let output = run(&[
        "parse-file",
        "--config",
        config.to_str().unwrap(),
        "--input",
        input.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "No alternatives found."
    );
}

#[test]
fn test_invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("deal-finder.yml");
    fs::write(&config, "parser:\n  heading_max_chars: 0\n").unwrap();

    let input = fixture("structured-reply.md");
    let output = run(&[
        "parse-file",
        "--config",
        config.to_str().unwrap(),
        "--input",
        input.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("heading_max_chars"));
}

// ---- parse-reply ----

#[test]
fn test_parse_reply_uses_tool_payload() {
    let input = fixture("assistant-message.json");
    let output = run(&["parse-reply", "--input", input.to_str().unwrap()]);

    let parsed = stdout_json(&output);
    assert_eq!(parsed.as_array().unwrap().len(), 2);
    assert_eq!(parsed[0]["title"], "Ninja Professional Blender");
    assert!(parsed[1].get("price").is_none());
}

#[test]
fn test_parse_reply_conversation() {
    let input = fixture("conversation.json");
    let output = run(&["parse-reply", "--input", input.to_str().unwrap()]);

    let parsed = stdout_json(&output);
    assert_eq!(parsed[0]["url"], "https://www.target.com/p/-/A-333");
}

// ---- parse-batch ----

#[test]
fn test_parse_batch_writes_sets_in_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let replies = dir.path().join("replies");
    fs::create_dir_all(&replies).unwrap();
    fs::copy(fixture("structured-reply.md"), replies.join("b-structured.md")).unwrap();
    fs::copy(fixture("heading-flat.md"), replies.join("a-flat.txt")).unwrap();
    fs::write(replies.join("ignored.json"), "{}").unwrap();

    let out_path = dir.path().join("out").join("sets.json");
    let output = run(&[
        "parse-batch",
        "--jobs",
        "2",
        "--input",
        replies.to_str().unwrap(),
        "--output",
        out_path.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "parse-batch failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).contains("Parsed 2 reply file(s); 6 alternative(s)"));

    let sets: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    let sets = sets.as_array().unwrap();
    assert_eq!(sets.len(), 2);
    assert_eq!(sets[0]["label"], "a-flat");
    assert_eq!(sets[0]["alternatives"].as_array().unwrap().len(), 3);
    assert_eq!(sets[1]["label"], "b-structured");
    assert_eq!(sets[1]["schema_version"], "1.0.0");
}

#[test]
fn test_parse_batch_empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("sets.json");
    let output = run(&[
        "parse-batch",
        "--input",
        dir.path().to_str().unwrap(),
        "--output",
        out_path.to_str().unwrap(),
    ]);

    assert!(!output.status.success());
    assert!(!out_path.exists());
}

// ---- prompt / validate ----

#[test]
fn test_prompt_from_product_context() {
    let dir = tempfile::tempdir().unwrap();
    let product = dir.path().join("product.json");
    fs::write(
        &product,
        r#"{"title":"Vitamix E310","price":"$349.95","categoryOrSpecs":"","currentUrl":"https://www.amazon.com/dp/B0758JHZM3","source":"Amazon"}"#,
    )
    .unwrap();

    let output = run(&["prompt", "--input", product.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim_end(),
        "Find better or similar product alternatives for this product:\n\nTitle: Vitamix E310\nPrice: $349.95\nPage URL: https://www.amazon.com/dp/B0758JHZM3"
    );
}

#[test]
fn test_prompt_instructions_mark_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let product = dir.path().join("product.json");
    fs::write(&product, r#"{"title":"Vitamix E310"}"#).unwrap();

    let output = run(&[
        "prompt",
        "--instructions",
        "--input",
        product.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("- Title: Vitamix E310\n- Price: unknown\n"));
    assert!(stdout.contains("do not make up URLs."));
}

#[test]
fn test_prompt_schema() {
    let output = run(&["prompt", "--schema"]);
    let parsed = stdout_json(&output);
    assert_eq!(parsed["required"][0], "alternatives");
}

#[test]
fn test_validate_reports_bad_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alternatives.json");
    fs::write(
        &path,
        r#"[{"title":"Mouse","url":"https://x.com/1"},{"title":"","url":"x.com/2"}]"#,
    )
    .unwrap();

    let output = run(&["validate", "--input", path.to_str().unwrap()]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("alternative #1: alternative title cannot be empty"));
    assert!(stderr.contains("error: 2 validation error(s)"));
}

#[test]
fn test_validate_accepts_parser_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("alternatives.json");

    let input = fixture("structured-reply.md");
    let parsed = run(&["parse-file", "--input", input.to_str().unwrap()]);
    assert!(parsed.status.success());
    fs::write(&path, &parsed.stdout).unwrap();

    let output = run(&["validate", "--input", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Validated 3 alternative(s)."));
}
