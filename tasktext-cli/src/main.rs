// Command-line interface for tasktext
//
// Converts task descriptions (Markdown or ADF JSON) into the canonical rich-text tree and
// checks the result against the canonical schema. The work is done by tasktext-babel; this
// binary reads files, picks formats and reports.
//
// The source format is auto-detected from the file extension, and can be overridden with
// an explicit --from flag.
// Usage:
//  tasktext <input> [--from <format>] [--to json|treeviz] [-o <file>]   - Convert (default)
//  tasktext convert <input> ...                                         - Same as above (explicit)
//  tasktext validate <input> [--from <format>]                          - Check schema conformance
//  tasktext ... --unknown-nodes pass-through|drop                       - Override the ADF unknown-node policy
//  tasktext --list-formats                                              - List available formats

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::fs;
use tasktext_babel::{validate, ConvertOptions, Document, FormatRegistry, UnknownNodePolicy};
use tasktext_config::{Loader, TasktextConfig, PROJECT_CONFIG_FILE};

const SUBCOMMANDS: &[&str] = &["convert", "validate", "help"];

fn build_cli() -> Command {
    Command::new("tasktext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert task descriptions into the canonical rich-text tree")
        .long_about(
            "tasktext converts Markdown and Atlassian Document Format (ADF) task\n\
            descriptions into the canonical rich-text tree.\n\n\
            Commands:\n  \
            - convert:  Convert a file to canonical JSON or a tree view (default)\n  \
            - validate: Check the converted tree against the canonical schema\n\n\
            Examples:\n  \
            tasktext task.md                         # Canonical JSON on stdout\n  \
            tasktext issue.json --to treeviz         # Tree view of an ADF document\n  \
            tasktext task.md -o task.json            # Write JSON to a file\n  \
            tasktext validate issue.adf              # Report schema violations",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a tasktext.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(unknown_nodes_arg())
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log dropped and skipped nodes to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert a task description (default command)")
                .long_about(
                    "Convert a Markdown or ADF file into the canonical tree.\n\n\
                    The source format is auto-detected from the file extension\n\
                    (.md/.markdown for Markdown, .adf/.json for ADF).\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(input_arg())
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format")
                        .value_parser(["json", "treeviz"])
                        .default_value("json")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Output file path (defaults to stdout)")
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("validate")
                .about("Check a converted document against the canonical schema")
                .long_about(
                    "Convert the input and report every schema violation with its path\n\
                    in the tree. Exits with status 1 when any violation is found.",
                )
                .arg(input_arg())
                .arg(from_arg()),
        )
}

fn input_arg() -> Arg {
    Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_parser(["markdown", "adf"])
        .value_hint(ValueHint::Other)
}

fn unknown_nodes_arg() -> Arg {
    Arg::new("unknown-nodes")
        .long("unknown-nodes")
        .value_name("POLICY")
        .help("Keep or drop unknown ADF nodes, overriding the configuration")
        .value_parser(["pass-through", "drop"])
        .global(true)
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file path means the convert subcommand
            if args.len() > 1
                && !args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_logging(matches.get_flag("verbose"));

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));
    let options = convert_options(
        &config,
        matches.get_one::<String>("unknown-nodes").map(|s| s.as_str()),
    );
    let registry = FormatRegistry::with_options(&options, config.output.pretty);

    if matches.get_flag("list-formats") {
        handle_list_formats_command(&registry);
        return;
    }

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = source_format(&registry, sub_matches, input);
            let to = sub_matches
                .get_one::<String>("to")
                .map(|s| s.as_str())
                .unwrap_or("json");
            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output);
        }
        Some(("validate", sub_matches)) => {
            let input = required(sub_matches, "input");
            let from = source_format(&registry, sub_matches, input);
            handle_validate_command(&registry, input, &from);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// `RUST_LOG` wins; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    match matches.get_one::<String>(name) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument '{name}'");
            std::process::exit(2);
        }
    }
}

fn source_format(registry: &FormatRegistry, matches: &ArgMatches, input: &str) -> String {
    if let Some(from) = matches.get_one::<String>("from") {
        return from.to_string();
    }
    match registry.detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

fn read_document(registry: &FormatRegistry, input: &str, from: &str) -> Document {
    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });
    registry.parse(&source, from).unwrap_or_else(|e| {
        eprintln!("Parse error: {e}");
        std::process::exit(1);
    })
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
) {
    let doc = read_document(registry, input, from);
    log::debug!("converted '{input}' ({from}) into {} blocks", doc.content.len());

    let mut text = registry.serialize(&doc, to).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    if !text.ends_with('\n') {
        text.push('\n');
    }

    match output {
        Some(path) => fs::write(path, text).unwrap_or_else(|e| {
            eprintln!("Error writing file '{path}': {e}");
            std::process::exit(1);
        }),
        None => print!("{text}"),
    }
}

/// Handle the validate command
fn handle_validate_command(registry: &FormatRegistry, input: &str, from: &str) {
    let doc = read_document(registry, input, from);
    let violations = validate(&doc);
    if violations.is_empty() {
        println!("{input}: ok ({} blocks)", doc.content.len());
        return;
    }
    for violation in &violations {
        println!("{input}: {violation}");
    }
    eprintln!("{} schema violation(s) found", violations.len());
    std::process::exit(1);
}

/// Handle the list-formats command
fn handle_list_formats_command(registry: &FormatRegistry) {
    println!("Available formats:\n");
    for name in registry.list_formats() {
        if let Ok(format) = registry.get(&name) {
            let direction = match (format.supports_parsing(), format.supports_serialization()) {
                (true, true) => "in/out",
                (true, false) => "in",
                (false, true) => "out",
                (false, false) => "-",
            };
            println!("  {name:<10} {direction:<7} {}", format.description());
        }
    }
}

/// Conversion options from the configuration, with command-line overrides applied.
fn convert_options(config: &TasktextConfig, unknown_nodes: Option<&str>) -> ConvertOptions {
    let mut options = ConvertOptions::from(&config.convert);
    if let Some(value) = unknown_nodes {
        options.unknown_nodes = value.parse::<UnknownNodePolicy>().unwrap_or_else(|err| {
            eprintln!("Error: {err}");
            std::process::exit(2);
        });
    }
    log::debug!(
        "unknown nodes: {}, max depth: {}",
        options.unknown_nodes.as_str(),
        options.max_depth
    );
    options
}

fn load_cli_config(explicit_path: Option<&str>) -> TasktextConfig {
    let loader = Loader::new().with_optional_file(PROJECT_CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
