//! Schema validation for `deny_unknown_schema_keys` mode.
//!
//! Walks the raw schema document (as `serde_json::Value`) and collects every
//! malformed or unrecognized declaration instead of stopping at the first one.

use crate::error::{SchemaValidationError, SchemaValidationIssue, SchemaValidationIssueKind};
use crate::json_pointer::SchemaPath;
use crate::schema::{MAX_FLAGS, is_leaf_declaration, is_metadata_key, is_plot_schema_document, value_type_tag};
use serde_json::{Map, Value};

/// Keys a leaf declaration may carry besides `_`-prefixed internals.
const KNOWN_LEAF_KEYS: &[&str] = &[
    "valType",
    "type",
    "description",
    "role",
    "editType",
    "impliedEdits",
    "dflt",
    "arrayOk",
    "values",
    "flags",
    "extras",
    "regex",
    "min",
    "max",
    "items",
    "freeLength",
    "dimensions",
    "noBlank",
    "strict",
    "coerceNumber",
    "anim",
    "required",
];

const KNOWN_VAL_TYPES: &[&str] = &[
    "boolean",
    "number",
    "integer",
    "string",
    "color",
    "colorlist",
    "colorscale",
    "angle",
    "any",
    "data_array",
    "info_array",
    "enumerated",
    "flaglist",
    "subplotid",
];

/// Validates the schema document. Returns `Ok(())` if no issues were found, or
/// `Err(SchemaValidationError)` with all of them.
///
/// # Errors
///
/// Returns `SchemaValidationError` listing every issue found.
pub fn validate_schema(value: &Value) -> Result<(), SchemaValidationError> {
    let mut issues: Vec<SchemaValidationIssue> = Vec::new();
    let root: SchemaPath = SchemaPath::root();

    let Value::Object(map) = value else {
        push_issue(&mut issues, &root, SchemaValidationIssueKind::RootNotObject);
        return Err(SchemaValidationError { issues });
    };

    if is_plot_schema_document(map) {
        validate_plot_schema(map, &root, &mut issues);
    } else {
        validate_attributes(map, &root, &mut issues);
    }

    tracing::debug!(issues = issues.len(), "validated schema");
    if issues.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError { issues })
    }
}

fn push_issue(
    issues: &mut Vec<SchemaValidationIssue>,
    path: &SchemaPath,
    kind: SchemaValidationIssueKind,
) {
    issues.push(SchemaValidationIssue {
        path: path.as_str().to_string(),
        kind,
    });
}

fn validate_plot_schema(
    map: &Map<String, Value>,
    root: &SchemaPath,
    issues: &mut Vec<SchemaValidationIssue>,
) {
    for (section, attributes_key) in [("traces", "attributes"), ("transforms", "attributes")] {
        let Some(definitions) = map.get(section) else {
            continue;
        };
        let section_path: SchemaPath = root.child(section);
        let Value::Object(definitions) = definitions else {
            push_issue(issues, &section_path, SchemaValidationIssueKind::DeclarationNotObject);
            continue;
        };
        for (name, definition) in definitions {
            let path: SchemaPath = section_path.child(name);
            validate_envelope(definition, attributes_key, &path, issues);
            if section == "traces"
                && let Some(layout_attributes) = definition.get("layoutAttributes")
            {
                let layout_path: SchemaPath = path.child("layoutAttributes");
                match layout_attributes {
                    Value::Object(attributes) => validate_attributes(attributes, &layout_path, issues),
                    _ => push_issue(issues, &layout_path, SchemaValidationIssueKind::DeclarationNotObject),
                }
            }
        }
    }

    if let Some(layout) = map.get("layout") {
        validate_envelope(layout, "layoutAttributes", &root.child("layout"), issues);
    }

    if let Some(frames) = map.get("frames") {
        validate_declaration(frames, &root.child("frames"), issues);
    }
}

fn validate_envelope(
    definition: &Value,
    attributes_key: &str,
    path: &SchemaPath,
    issues: &mut Vec<SchemaValidationIssue>,
) {
    let attributes_path: SchemaPath = path.child(attributes_key);
    match definition.get(attributes_key) {
        Some(Value::Object(attributes)) => validate_attributes(attributes, &attributes_path, issues),
        _ => push_issue(issues, &attributes_path, SchemaValidationIssueKind::DeclarationNotObject),
    }
}

/// Children of an object declaration (or of the document root).
fn validate_attributes(
    map: &Map<String, Value>,
    path: &SchemaPath,
    issues: &mut Vec<SchemaValidationIssue>,
) {
    let mut declared: usize = 0;
    for (key, value) in map {
        let key_path: SchemaPath = path.child(key);
        if key == "_deprecated" {
            match value {
                Value::Object(deprecated) => {
                    for (name, declaration) in deprecated {
                        declared += 1;
                        validate_declaration(declaration, &key_path.child(name), issues);
                    }
                }
                _ => push_issue(issues, &key_path, SchemaValidationIssueKind::DeclarationNotObject),
            }
            continue;
        }
        if is_metadata_key(key) || (key == "type" && value.is_string()) {
            continue;
        }
        declared += 1;
        validate_declaration(value, &key_path, issues);
    }
    if declared == 0 {
        push_issue(issues, path, SchemaValidationIssueKind::ObjectWithoutAttributes);
    }
}

fn validate_declaration(value: &Value, path: &SchemaPath, issues: &mut Vec<SchemaValidationIssue>) {
    let Value::Object(map) = value else {
        push_issue(issues, path, SchemaValidationIssueKind::DeclarationNotObject);
        return;
    };
    if is_leaf_declaration(map) {
        validate_leaf(map, path, issues);
    } else if let Some(items) = map.get("items") {
        validate_collection(items, &path.child("items"), issues);
    } else {
        validate_attributes(map, path, issues);
    }
}

fn validate_collection(items: &Value, path: &SchemaPath, issues: &mut Vec<SchemaValidationIssue>) {
    let Some(items) = items.as_object().filter(|items| items.len() == 1) else {
        push_issue(issues, path, SchemaValidationIssueKind::CollectionItemsNotSingle);
        return;
    };
    for (name, element) in items {
        let element_path: SchemaPath = path.child(name);
        let declares_attributes: bool = element.as_object().is_some_and(|element| {
            element
                .iter()
                .any(|(key, value)| key == "_deprecated" || (!is_metadata_key(key) && value.is_object()))
        });
        if declares_attributes {
            validate_declaration(element, &element_path, issues);
        } else if !element.is_object() {
            push_issue(issues, &element_path, SchemaValidationIssueKind::DeclarationNotObject);
        }
    }
}

fn validate_leaf(map: &Map<String, Value>, path: &SchemaPath, issues: &mut Vec<SchemaValidationIssue>) {
    for key in map.keys() {
        if !key.starts_with('_') && !KNOWN_LEAF_KEYS.contains(&key.as_str()) {
            push_issue(
                issues,
                &path.child(key),
                SchemaValidationIssueKind::UnknownAttributeKey(key.clone()),
            );
        }
    }

    if map.get("arrayOk").is_some_and(|array_ok| !array_ok.is_boolean()) {
        push_issue(issues, &path.child("arrayOk"), SchemaValidationIssueKind::InvalidArrayOk);
    }

    let tag_path: SchemaPath = path.child("valType");
    let tag: &str = match value_type_tag(map) {
        Some(Value::String(tag)) => tag,
        _ => {
            push_issue(issues, &tag_path, SchemaValidationIssueKind::InvalidValType);
            return;
        }
    };
    if !KNOWN_VAL_TYPES.contains(&tag) {
        push_issue(issues, &tag_path, SchemaValidationIssueKind::UnknownValType(tag.to_string()));
        return;
    }

    match tag {
        "enumerated" => validate_enum_values(map.get("values"), &path.child("values"), issues),
        "flaglist" => {
            let has_flags: bool = map
                .get("flags")
                .and_then(Value::as_array)
                .is_some_and(|flags| flags.iter().all(Value::is_string));
            if !has_flags {
                push_issue(issues, &path.child("flags"), SchemaValidationIssueKind::FlagListMissingFlags);
            }
            let count: usize = ["flags", "extras"]
                .iter()
                .filter_map(|key| map.get(*key).and_then(Value::as_array))
                .map(Vec::len)
                .sum();
            if count > MAX_FLAGS {
                push_issue(issues, path, SchemaValidationIssueKind::TooManyFlags(count));
            }
        }
        "subplotid" => {
            if let Some(Value::String(raw)) = map.get("regex") {
                let pattern: String = crate::schema::strip_regex_delimiters(raw);
                if let Err(e) = regress::Regex::new(&pattern) {
                    push_issue(
                        issues,
                        &path.child("regex"),
                        SchemaValidationIssueKind::InvalidRegex(e.to_string()),
                    );
                }
            }
        }
        _ => {}
    }
}

fn validate_enum_values(
    values: Option<&Value>,
    path: &SchemaPath,
    issues: &mut Vec<SchemaValidationIssue>,
) {
    let Some(values) = values.and_then(Value::as_array).filter(|values| !values.is_empty()) else {
        push_issue(issues, path, SchemaValidationIssueKind::EnumeratedMissingValues);
        return;
    };
    for (index, value) in values.iter().enumerate() {
        if !(value.is_string() || value.is_boolean() || value.is_number()) {
            push_issue(
                issues,
                &path.child(&index.to_string()),
                SchemaValidationIssueKind::InvalidEnumValue,
            );
        }
    }
}
