use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use deal_finder_core::{AlternativeSet, ProductAlternative, ProductContext, validate_alternatives};
use deal_finder_parser::output::{OutputFormat, format_alternatives, format_report};
use deal_finder_parser::{FinderConfig, parse_alternatives_with_report};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
            CliOutputFormat::Table => Self::Table,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "deal-finder")]
#[command(about = "Extract product alternatives from deal-finder agent replies")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse reply text from stdin.
    ParseStdin(ParseStdinArgs),
    /// Parse reply text from a file.
    ParseFile(ParseFileArgs),
    /// Resolve alternatives from a JSON assistant message or conversation.
    ParseReply(ParseReplyArgs),
    /// Parse every .md/.txt reply in a directory in parallel.
    ParseBatch(ParseBatchArgs),
    /// Print the agent prompt for a product context JSON file.
    Prompt(PromptArgs),
    /// Validate a JSON array of alternatives.
    Validate(ValidateArgs),
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// YAML config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output format (overrides output.format from the config).
    #[arg(long)]
    format: Option<CliOutputFormat>,
}

#[derive(Debug, Args)]
struct ParseStdinArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Output both alternatives and the parse report.
    #[arg(long)]
    with_report: bool,
}

#[derive(Debug, Args)]
struct ParseFileArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Path to file containing reply text.
    #[arg(long)]
    input: PathBuf,
    /// Output both alternatives and the parse report.
    #[arg(long)]
    with_report: bool,
}

#[derive(Debug, Args)]
struct ParseReplyArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Path to a JSON message or conversation document.
    #[arg(long)]
    input: PathBuf,
}

#[derive(Debug, Args)]
struct ParseBatchArgs {
    /// Directory containing reply files.
    #[arg(long)]
    input: PathBuf,
    /// Output JSON path for the parsed sets.
    #[arg(long)]
    output: PathBuf,
    /// YAML config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of parallel parse jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct PromptArgs {
    /// Product context JSON file.
    #[arg(long, required_unless_present = "schema")]
    input: Option<PathBuf>,
    /// Print the response JSON schema instead of a prompt.
    #[arg(long)]
    schema: bool,
    /// Print the standalone web-search instructions instead of the chat prompt.
    #[arg(long, conflicts_with = "schema")]
    instructions: bool,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// JSON file holding an array of alternatives.
    #[arg(long)]
    input: PathBuf,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::ParseStdin(args) => run_parse_stdin(args),
        Command::ParseFile(args) => run_parse_file(args),
        Command::ParseReply(args) => run_parse_reply(args),
        Command::ParseBatch(args) => run_parse_batch(args),
        Command::Prompt(args) => run_prompt(args),
        Command::Validate(args) => run_validate(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable. Filter with `RUST_LOG`.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_parse_stdin(args: ParseStdinArgs) -> Result<(), String> {
    let mut reply = String::new();
    std::io::stdin()
        .read_to_string(&mut reply)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;
    run_parse_reply_text(&reply, &args.common, args.with_report)
}

fn run_parse_file(args: ParseFileArgs) -> Result<(), String> {
    let reply = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    run_parse_reply_text(&reply, &args.common, args.with_report)
}

fn run_parse_reply_text(reply: &str, common: &CommonArgs, with_report: bool) -> Result<(), String> {
    let config = load_config(common.config.as_deref())?;
    let format = resolve_format(common, &config);
    let run = parse_alternatives_with_report(Some(reply), &config.parser);
    debug!(outcome = %run.report.outcome, count = run.alternatives.len(), "Parsed reply");

    if !with_report {
        println!("{}", format_alternatives(&run.alternatives, format)?);
        return Ok(());
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&run)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&run)
                .map_err(|e| format!("Failed to serialize output: {e}"))?;
            println!("{yaml}");
        }
        _ => {
            println!("{}", format_alternatives(&run.alternatives, format)?);
            print!("{}", format_report(&run.report, format)?);
        }
    }
    Ok(())
}

fn run_parse_reply(args: ParseReplyArgs) -> Result<(), String> {
    use deal_finder_parser::reply::{alternatives_from_message, message_from_document};

    let config = load_config(args.common.config.as_deref())?;
    let format = resolve_format(&args.common, &config);

    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let document: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|err| format!("Invalid JSON in '{}': {err}", args.input.display()))?;

    let alternatives = match message_from_document(document).map_err(|e| e.to_string())? {
        Some(message) => alternatives_from_message(&message, &config.parser),
        None => {
            info!(input = %args.input.display(), "Conversation has no assistant reply yet");
            Vec::new()
        }
    };

    println!("{}", format_alternatives(&alternatives, format)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// parse-batch command
// ---------------------------------------------------------------------------

fn run_parse_batch(args: ParseBatchArgs) -> Result<(), String> {
    use rayon::prelude::*;

    let config = load_config(args.config.as_deref())?;
    let paths = collect_reply_paths(&args.input)?;
    if paths.is_empty() {
        return Err(format!(
            "No .md or .txt reply files found in '{}'",
            args.input.display()
        ));
    }

    let jobs = args.jobs.filter(|jobs| *jobs > 0).unwrap_or(0);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .map_err(|e| format!("Failed to build thread pool: {e}"))?;

    let generated_at = chrono::Utc::now().to_rfc3339();
    let parse_one = |path: &PathBuf| -> Result<AlternativeSet, String> {
        let reply = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
        let run = parse_alternatives_with_report(Some(&reply), &config.parser);
        for warning in &run.report.warnings {
            debug!(path = %path.display(), warning = %warning, "Parse warning");
        }

        let mut set = AlternativeSet::new(generated_at.clone());
        set.label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned());
        set.alternatives = run.alternatives;
        Ok(set)
    };

    // par_iter preserves input order, and the paths are already sorted.
    let sets = pool.install(|| {
        paths
            .par_iter()
            .map(parse_one)
            .collect::<Result<Vec<_>, String>>()
    })?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    let json = serde_json::to_string_pretty(&sets)
        .map_err(|e| format!("Failed to serialize output: {e}"))?;
    fs::write(&args.output, json)
        .map_err(|err| format!("Failed to write '{}': {err}", args.output.display()))?;

    let total: usize = sets.iter().map(AlternativeSet::alternative_count).sum();
    println!(
        "Parsed {} reply file(s); {} alternative(s) written to '{}'.",
        sets.len(),
        total,
        args.output.display()
    );
    Ok(())
}

fn collect_reply_paths(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|err| format!("Failed to read directory '{}': {err}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|err| format!("Failed to read directory entry: {err}"))?
            .path();
        let is_reply = path.is_file()
            && path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| matches!(ext, "md" | "txt"));
        if is_reply {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

// ---------------------------------------------------------------------------
// prompt / validate commands
// ---------------------------------------------------------------------------

fn run_prompt(args: PromptArgs) -> Result<(), String> {
    use deal_finder_parser::prompt::{
        alternatives_response_schema, build_agent_instructions, build_user_prompt,
    };

    if args.schema {
        let json = serde_json::to_string_pretty(&alternatives_response_schema())
            .map_err(|e| format!("Failed to serialize schema: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let Some(input) = args.input else {
        return Err("Specify --input or --schema".to_string());
    };
    let raw = fs::read_to_string(&input)
        .map_err(|err| format!("Failed to read '{}': {err}", input.display()))?;
    let product: ProductContext = serde_json::from_str(&raw)
        .map_err(|err| format!("Invalid product context in '{}': {err}", input.display()))?;

    if args.instructions {
        println!("{}", build_agent_instructions(&product));
    } else {
        println!("{}", build_user_prompt(&product));
    }
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("Failed to read '{}': {err}", args.input.display()))?;
    let alternatives: Vec<ProductAlternative> = serde_json::from_str(&raw)
        .map_err(|err| format!("Invalid alternatives in '{}': {err}", args.input.display()))?;

    let errors = validate_alternatives(&alternatives);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("{error}");
        }
        return Err(format!("{} validation error(s)", errors.len()));
    }

    println!("Validated {} alternative(s).", alternatives.len());
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FinderConfig, String> {
    match path {
        Some(path) => FinderConfig::load(path)
            .map_err(|e| format!("Failed to load config '{}': {e}", path.display())),
        None => Ok(FinderConfig::default()),
    }
}

fn resolve_format(common: &CommonArgs, config: &FinderConfig) -> OutputFormat {
    common
        .format
        .map(OutputFormat::from)
        .unwrap_or(config.output.format)
}
