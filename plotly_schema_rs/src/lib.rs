//! Generate strongly-typed Rust bindings from the Plotly plot schema.
//!
//! The generator reads `plot-schema.json` (or a bare attribute tree in the same
//! declaration language) and emits one Rust type per trace, layout, transform
//! and nested object, each with a hand-written `serde::Serialize` that
//! produces exactly the JSON the Plotly runtime accepts.
//!
//! Generated code links against [`runtime`].

mod codegen;
mod descriptor;
mod emit;
mod encoding;
mod error;
mod json_pointer;
mod naming;
pub mod runtime;
mod schema;
mod settings;
mod synth;
mod validate;
mod workaround;

pub use descriptor::{
    CaseValue, CustomEncoding, DefaultExpr, EncodeStrategy, EnumCase, Family, FieldDescriptor, FieldType,
    FlagCase, Registry, StructRole, TypeDescriptor, TypeShape,
};
pub use emit::{HEADER, emit};
pub use encoding::attach_encoding;
pub use error::{
    PlotlySchemaGenError, SchemaValidationError, SchemaValidationIssue, SchemaValidationIssueKind,
};
pub use json_pointer::SchemaPath;
pub use schema::{
    CollectionElement, CollectionNode, EnumValue, LeafAttribute, NodeKind, ObjectNode, ObjectRole,
    SchemaNode, ValueType, parse, parse_document,
};
pub use settings::{DEFAULT_CONVENIENCE_FIELDS, GenerateSettings, WorkaroundSelection};
pub use synth::{share_identical_enums, synthesize};
pub use validate::validate_schema;
pub use workaround::{
    FieldPatch, WorkaroundRule, apply_workarounds, builtin_rules, resolve_rules, validate_rules,
};

use std::io::Write;
use std::path::Path;

/// Generate Rust types from a Plotly schema string and write them to `writer`.
///
/// The writer can be any type implementing `Write`, such as `File`, `Vec<u8>`, or
/// `Cursor<Vec<u8>>`. Nothing is written unless generation succeeds.
///
/// # Errors
///
/// Returns `PlotlySchemaGenError` if the schema JSON is invalid, strict
/// validation fails, a declaration cannot be read, two nodes map to the same
/// name, a workaround target is missing, or writing to the writer fails.
pub fn generate_to_writer<W: Write>(
    schema_json: &str,
    writer: &mut W,
    settings: &GenerateSettings,
) -> Result<(), PlotlySchemaGenError> {
    codegen::generate_to_writer(schema_json, writer, settings)
}

/// Generate Rust types from a Plotly schema string and return them as a `String`.
///
/// # Errors
///
/// Same as [`generate_to_writer`].
pub fn generate_to_string(
    schema_json: &str,
    settings: &GenerateSettings,
) -> Result<String, PlotlySchemaGenError> {
    let mut output: Vec<u8> = Vec::new();
    generate_to_writer(schema_json, &mut output, settings)?;
    String::from_utf8(output)
        .map_err(|e| PlotlySchemaGenError::GenericError(format!("generated code is not UTF-8: {e}")))
}

/// Generate Rust types from a Plotly schema file and write them to an output file.
///
/// The output file is only created once generation has succeeded.
///
/// # Errors
///
/// Returns `PlotlySchemaGenError` if reading the input file fails, generation
/// fails, or writing the output file fails.
pub fn generate_from_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    settings: &GenerateSettings,
) -> Result<(), PlotlySchemaGenError> {
    let schema_json: String = std::fs::read_to_string(input_path)?;
    let code: String = generate_to_string(&schema_json, settings)?;
    std::fs::write(output_path, code)?;
    Ok(())
}
