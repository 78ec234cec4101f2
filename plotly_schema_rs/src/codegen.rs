//! The generation pipeline: parse, synthesize, encode, patch, emit.
//!
//! Every stage runs to completion before the next starts and any error aborts
//! the run. Output is rendered into a buffer and only handed to the writer once
//! the whole registry has been emitted, so a failed run writes nothing.

use crate::descriptor::Registry;
use crate::emit;
use crate::encoding;
use crate::error::PlotlySchemaGenError;
use crate::schema::{self, SchemaNode};
use crate::settings::GenerateSettings;
use crate::synth;
use crate::validate;
use crate::workaround::{self, WorkaroundRule};
use serde_json::Value;
use std::io::Write;

pub fn generate_to_writer<W: Write>(
    schema_json: &str,
    writer: &mut W,
    settings: &GenerateSettings,
) -> Result<(), PlotlySchemaGenError> {
    let document: Value = serde_json::from_str(schema_json)?;
    let registry: Registry = build_registry(&document, settings)?;

    let mut buffer: Vec<u8> = Vec::new();
    emit::emit(&registry, settings, &mut buffer)?;
    writer.write_all(&buffer)?;
    writer.flush()?;

    tracing::info!(
        types = registry.len(),
        bytes = buffer.len(),
        "generated Rust bindings"
    );
    Ok(())
}

/// Run every stage up to (not including) emission.
pub(crate) fn build_registry(
    document: &Value,
    settings: &GenerateSettings,
) -> Result<Registry, PlotlySchemaGenError> {
    if settings.deny_unknown_schema_keys {
        validate::validate_schema(document)?;
    }

    let root: SchemaNode = schema::parse_document(document, &settings.root_name)?;
    tracing::debug!(
        top_level = root.children().len(),
        plot_document = root.is_plot_document(),
        "parsed schema"
    );

    let rules: Vec<WorkaroundRule> = workaround::resolve_rules(&settings.workarounds, &root);
    workaround::validate_rules(&rules, &root)?;

    let mut registry: Registry = synth::synthesize(&root)?;
    tracing::debug!(types = registry.len(), "synthesized types");
    if settings.share_enums {
        synth::share_identical_enums(&mut registry);
    }
    encoding::attach_encoding(&mut registry)?;
    workaround::apply_workarounds(&mut registry, &rules)?;
    tracing::debug!(rules = rules.len(), "applied workarounds");
    Ok(registry)
}
