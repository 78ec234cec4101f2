//! Binary to generate Rust types from the Plotly plot schema.
//!
//! Usage: `plotly-schema-to-rust-cli < plot-schema.json > plotly_types.rs`
//!
//! Reads the schema from stdin and writes generated Rust to stdout.

use std::io::{read_to_string, stdin, stdout};
use std::process;

use plotly_schema_rs::{GenerateSettings, generate_to_writer};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let schema_json: String = match read_to_string(stdin()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading stdin: {e}");
            process::exit(1);
        }
    };

    let settings: GenerateSettings = GenerateSettings::default();
    if let Err(e) = generate_to_writer(&schema_json, &mut stdout(), &settings) {
        tracing::error!(error = %e, "generation failed");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
