//! Workaround/Override Layer: named patches for schema nodes whose generic
//! mapping does not match what the Plotly runtime accepts.
//!
//! Every rule names its target twice: by schema path, checked against the
//! parsed schema before synthesis starts, and by `(type, field)`, looked up in
//! the registry when the rule is applied. A rule whose target is gone fails
//! the run with `UnknownWorkaroundTargetError`.

use crate::descriptor::{
    CustomEncoding, DefaultExpr, EncodeStrategy, Family, FieldDescriptor, FieldType, Registry,
};
use crate::error::PlotlySchemaGenError;
use crate::schema::SchemaNode;
use crate::settings::WorkaroundSelection;

/// One change to a field descriptor. Patches set values rather than toggle
/// them, so reapplying a rule is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPatch {
    /// Make the field always present, starting from `DefaultExpr`.
    ForceRequired(DefaultExpr),
    OverrideType(FieldType),
    SetArray(bool),
    InjectEncoding(CustomEncoding),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkaroundRule {
    pub name: String,
    pub target_type: String,
    /// Schema (wire) name of the field.
    pub target_field: String,
    /// Attribute names from the document root down to the target; empty skips
    /// the pre-synthesis check.
    pub schema_path: Vec<String>,
    pub patches: Vec<FieldPatch>,
}

/// The rules every full plot schema needs.
///
/// * `frame-data-traces`: a frame's `data` is declared as `any` but holds the
///   traces of that keyframe. It becomes a required, empty-by-default list of
///   traces, each encoded by its own routine.
/// * `frame-layout`: a frame's `layout` is a regular `Layout`.
#[must_use]
pub fn builtin_rules() -> Vec<WorkaroundRule> {
    vec![
        WorkaroundRule {
            name: "frame-data-traces".to_string(),
            target_type: "Frame".to_string(),
            target_field: "data".to_string(),
            schema_path: vec!["frames".to_string(), "data".to_string()],
            patches: vec![
                FieldPatch::OverrideType(FieldType::Polymorphic(Family::Trace)),
                FieldPatch::SetArray(true),
                FieldPatch::ForceRequired(DefaultExpr::EmptyVec),
                FieldPatch::InjectEncoding(CustomEncoding {
                    wire_key: "data".to_string(),
                    element: Some("Trace".to_string()),
                    strategy: EncodeStrategy::DelegateSequence,
                }),
            ],
        },
        WorkaroundRule {
            name: "frame-layout".to_string(),
            target_type: "Frame".to_string(),
            target_field: "layout".to_string(),
            schema_path: vec!["frames".to_string(), "layout".to_string()],
            patches: vec![FieldPatch::OverrideType(FieldType::Named(
                "Layout".to_string(),
            ))],
        },
    ]
}

/// The rules a run applies to `root`.
///
/// `Auto` keeps the built-in rules whose top-level section (`frames`) is part
/// of the document; a section that is present but lacks the patched attribute
/// still fails validation. Custom rules are always kept.
#[must_use]
pub fn resolve_rules(selection: &WorkaroundSelection, root: &SchemaNode) -> Vec<WorkaroundRule> {
    match selection {
        WorkaroundSelection::Auto if root.is_plot_document() => builtin_rules()
            .into_iter()
            .filter(|rule| section_present(rule, root))
            .collect(),
        WorkaroundSelection::Auto | WorkaroundSelection::Disabled => Vec::new(),
        WorkaroundSelection::Custom(rules) => rules.clone(),
    }
}

fn section_present(rule: &WorkaroundRule, root: &SchemaNode) -> bool {
    rule.schema_path
        .first()
        .is_none_or(|section| root.find(&[section.as_str()]).is_some())
}

/// Check every rule's schema path against the parsed schema.
///
/// # Errors
///
/// Returns `UnknownWorkaroundTargetError` for the first rule whose path does
/// not resolve.
pub fn validate_rules(
    rules: &[WorkaroundRule],
    root: &SchemaNode,
) -> Result<(), PlotlySchemaGenError> {
    for rule in rules {
        if rule.schema_path.is_empty() {
            continue;
        }
        let segments: Vec<&str> = rule.schema_path.iter().map(String::as_str).collect();
        if root.find(&segments).is_none() {
            return Err(unknown_target(rule, &rule.target_type, &rule.target_field));
        }
    }
    Ok(())
}

/// Apply `rules` in order.
///
/// # Errors
///
/// Returns `UnknownWorkaroundTargetError` when a target type or field does not
/// exist, or an overriding type is not in the registry.
pub fn apply_workarounds(
    registry: &mut Registry,
    rules: &[WorkaroundRule],
) -> Result<(), PlotlySchemaGenError> {
    for rule in rules {
        for patch in &rule.patches {
            if let FieldPatch::OverrideType(ty) = patch
                && let Some(name) = ty.named()
                && !registry.contains(name)
            {
                return Err(unknown_target(rule, name, &rule.target_field));
            }
        }

        let field: &mut FieldDescriptor = registry
            .get_mut(&rule.target_type)
            .and_then(|descriptor| descriptor.fields_mut())
            .and_then(|fields| fields.iter_mut().find(|f| f.schema_name == rule.target_field))
            .ok_or_else(|| unknown_target(rule, &rule.target_type, &rule.target_field))?;

        for patch in &rule.patches {
            apply_patch(field, patch);
        }
        tracing::debug!(rule = %rule.name, target = %format!("{}.{}", rule.target_type, rule.target_field), "applied workaround");
    }
    Ok(())
}

fn apply_patch(field: &mut FieldDescriptor, patch: &FieldPatch) {
    match patch {
        FieldPatch::ForceRequired(default) => {
            field.optional = false;
            field.default_expression = Some(default.clone());
        }
        FieldPatch::OverrideType(ty) => field.ty = ty.clone(),
        FieldPatch::SetArray(is_array) => field.is_array = *is_array,
        FieldPatch::InjectEncoding(encoding) => {
            field.wire_key = Some(encoding.wire_key.clone());
            field.custom_encoding = Some(encoding.clone());
        }
    }
}

fn unknown_target(rule: &WorkaroundRule, type_name: &str, field_name: &str) -> PlotlySchemaGenError {
    PlotlySchemaGenError::UnknownWorkaroundTargetError {
        rule: rule.name.clone(),
        type_name: type_name.to_string(),
        field_name: field_name.to_string(),
    }
}
