use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command definition in src/main.rs, which build scripts can't reach
fn build_cli() -> Command {
    let input = Arg::new("input")
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath);
    let from = Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_parser(["markdown", "adf"]);

    Command::new("tasktext")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert task descriptions into the canonical rich-text tree")
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
        .arg(
            Arg::new("unknown-nodes")
                .long("unknown-nodes")
                .value_name("POLICY")
                .help("Keep or drop unknown ADF nodes, overriding the configuration")
                .value_parser(["pass-through", "drop"])
                .global(true),
        )
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
                .arg(input.clone())
                .arg(from.clone())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Output format")
                        .value_parser(["json", "treeviz"]),
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
                .arg(input)
                .arg(from),
        )
}

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=build.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = build_cli();

    generate_to(Bash, &mut cmd, "tasktext", &outdir)?;
    generate_to(Zsh, &mut cmd, "tasktext", &outdir)?;
    generate_to(Fish, &mut cmd, "tasktext", &outdir)?;

    Ok(())
}
