//! Binary to generate Rust types from the Plotly plot schema.
//!
//! Usage: `plotlyschemars plot-schema.json -o plotly_types.rs`
//!
//! Reads the schema from INPUT (or stdin) and writes generated Rust to OUTPUT
//! (or stdout). Logs go to stderr; set `RUST_LOG=debug` for per-stage detail.

use std::io::{Write, read_to_string, stdin, stdout};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use plotly_schema_rs::{
    GenerateSettings, PlotlySchemaGenError, WorkaroundSelection, generate_to_string,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plotlyschemars", version, about = "Generate Rust types from the Plotly plot schema")]
struct Cli {
    /// Schema file to read (default: stdin)
    input: Option<PathBuf>,

    /// File to write the generated code to (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Type name for the root of a bare attribute tree
    #[arg(long, value_name = "NAME", default_value = "Root")]
    root_name: String,

    /// Path generated code uses to reach the runtime support module
    #[arg(long, value_name = "PATH", default_value = "::plotly_schema_rs::runtime")]
    runtime_path: String,

    /// Reject unknown keys and malformed declarations, reporting all of them
    #[arg(long)]
    strict: bool,

    /// Do not apply the built-in workaround rules
    #[arg(long)]
    no_workarounds: bool,

    /// Keep one enumeration type per attribute instead of sharing identical ones
    #[arg(long)]
    no_shared_enums: bool,
}

impl Cli {
    fn settings(&self) -> GenerateSettings {
        GenerateSettings {
            root_name: self.root_name.clone(),
            runtime_path: self.runtime_path.clone(),
            deny_unknown_schema_keys: self.strict,
            workarounds: if self.no_workarounds {
                WorkaroundSelection::Disabled
            } else {
                WorkaroundSelection::Auto
            },
            share_enums: !self.no_shared_enums,
            ..GenerateSettings::default()
        }
    }
}

fn run(cli: &Cli) -> Result<(), PlotlySchemaGenError> {
    let schema_json: String = match &cli.input {
        Some(path) => std::fs::read_to_string(path)?,
        None => read_to_string(stdin())?,
    };
    let code: String = generate_to_string(&schema_json, &cli.settings())?;
    match &cli.output {
        Some(path) => std::fs::write(path, code)?,
        None => stdout().write_all(code.as_bytes())?,
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli: Cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
