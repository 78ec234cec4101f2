//! Encoding Synthesizer: assigns each field its wire key and, where the
//! in-memory shape differs from the wire shape, a custom encoding.

use crate::descriptor::{
    CustomEncoding, DefaultExpr, EncodeStrategy, FieldDescriptor, FieldType, Registry,
};
use crate::error::PlotlySchemaGenError;
use crate::json_pointer::SchemaPath;

/// Attach wire keys and custom encodings to every struct field, in place.
///
/// * subplot references are written as their identity string;
/// * polymorphic fields delegate to the concrete value's encode routine;
/// * numbered subplot objects write one key per instance;
/// * deprecated fields move after all current fields, keeping relative order.
///
/// # Errors
///
/// Returns `SchemaParseError` when a subplot attribute's regex does not compile
/// or does not accept the strings its field would produce.
pub fn attach_encoding(registry: &mut Registry) -> Result<(), PlotlySchemaGenError> {
    let mut custom: usize = 0;
    for descriptor in registry.iter_mut() {
        let type_path: String = descriptor.schema_path.clone();
        let Some(fields) = descriptor.fields_mut() else {
            continue;
        };
        for field in fields.iter_mut() {
            field.wire_key = Some(field.schema_name.clone());
            if let Some(encoding) = encoding_for(field, &type_path)? {
                field.custom_encoding = Some(encoding);
                custom += 1;
            }
        }
        fields.sort_by_key(|field| field.deprecated);
    }
    tracing::debug!(custom, "attached field encodings");
    Ok(())
}

fn encoding_for(
    field: &mut FieldDescriptor,
    type_path: &str,
) -> Result<Option<CustomEncoding>, PlotlySchemaGenError> {
    let wire_key: String = field.schema_name.clone();
    let encoding: Option<CustomEncoding> = match &field.ty {
        FieldType::SubplotRef { base, pattern } => {
            if let Some(pattern) = pattern {
                check_subplot_pattern(base, pattern, type_path, &field.schema_name)?;
            }
            let base: String = base.clone();
            if !field.optional && field.default_expression.is_none() {
                field.default_expression = Some(DefaultExpr::Subplot(1));
            }
            Some(CustomEncoding {
                wire_key,
                element: None,
                strategy: EncodeStrategy::SubplotReference { base },
            })
        }
        FieldType::Subplots(_) => Some(CustomEncoding {
            wire_key: wire_key.clone(),
            element: field.ty.named().map(String::from),
            strategy: EncodeStrategy::SubplotObjects { base: wire_key },
        }),
        FieldType::Polymorphic(_) => Some(CustomEncoding {
            wire_key,
            element: None,
            strategy: if field.is_array {
                EncodeStrategy::DelegateSequence
            } else {
                EncodeStrategy::Delegate
            },
        }),
        _ => None,
    };
    Ok(encoding)
}

/// The first and second subplot strings (`"x"`, `"x2"`) must both be legal.
fn check_subplot_pattern(
    base: &str,
    pattern: &str,
    type_path: &str,
    schema_name: &str,
) -> Result<(), PlotlySchemaGenError> {
    let path: String = field_path(type_path, schema_name);
    let regex: regress::Regex = regress::Regex::new(pattern).map_err(|e| {
        PlotlySchemaGenError::parse(path.as_str(), format!("invalid subplot regex: {e}"))
    })?;
    for wire in [base.to_string(), format!("{base}2")] {
        if regex.find(&wire).is_none() {
            return Err(PlotlySchemaGenError::parse(
                path,
                format!("subplot reference `{wire}` does not match /{pattern}/"),
            ));
        }
    }
    Ok(())
}

fn field_path(type_path: &str, schema_name: &str) -> String {
    let mut path: String = type_path.trim_end_matches('/').to_string();
    path.push_str(SchemaPath::root().child(schema_name).as_str());
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Family, TypeDescriptor};
    use crate::schema;
    use crate::synth;

    fn encoded(json: &serde_json::Value) -> Result<Registry, PlotlySchemaGenError> {
        let root: schema::SchemaNode = schema::parse_document(json, "Root")?;
        let mut registry: Registry = synth::synthesize(&root)?;
        attach_encoding(&mut registry)?;
        Ok(registry)
    }

    #[test]
    fn wire_key_is_schema_name() {
        let registry: Registry = encoded(&serde_json::json!({
            "autocolorscale": { "valType": "boolean" }
        }))
        .expect("encode");
        let field: &FieldDescriptor = &registry.get("Root").expect("Root").fields()[0];
        assert_eq!("auto_color_scale", field.field_name);
        assert_eq!(Some("autocolorscale"), field.wire_key.as_deref());
        assert_eq!(None, field.custom_encoding);
    }

    #[test]
    fn subplot_reference_is_custom_encoded() {
        let registry: Registry = encoded(&serde_json::json!({
            "yaxis": { "valType": "subplotid", "dflt": "y", "regex": "/^y([2-9]|[1-9][0-9]+)?$/" }
        }))
        .expect("encode");
        let field: &FieldDescriptor = &registry.get("Root").expect("Root").fields()[0];
        assert!(!field.optional);
        assert_eq!(Some(DefaultExpr::Subplot(1)), field.default_expression);
        assert_eq!(
            Some(CustomEncoding {
                wire_key: "yaxis".to_string(),
                element: None,
                strategy: EncodeStrategy::SubplotReference {
                    base: "y".to_string()
                },
            }),
            field.custom_encoding
        );
    }

    #[test]
    fn subplot_reference_without_default_stays_optional() {
        let registry: Registry = encoded(&serde_json::json!({
            "coloraxis": { "valType": "subplotid", "dflt": null, "regex": "/^coloraxis([2-9]|[1-9][0-9]+)?$/" },
            "legend": { "valType": "subplotid", "regex": "/^legend([2-9]|[1-9][0-9]+)?$/" }
        }))
        .expect("encode");
        for field in registry.get("Root").expect("Root").fields() {
            assert!(field.optional, "{} should be optional", field.schema_name);
            assert_eq!(None, field.default_expression);
            assert!(
                matches!(
                    field.custom_encoding.as_ref().map(|e| &e.strategy),
                    Some(EncodeStrategy::SubplotReference { .. })
                ),
                "{} should encode as a subplot reference",
                field.schema_name
            );
        }
    }

    #[test]
    fn subplot_pattern_mismatch_fails() {
        let error: PlotlySchemaGenError = encoded(&serde_json::json!({
            "geo": { "valType": "subplotid", "dflt": "geo", "regex": "/^x$/" }
        }))
        .expect_err("pattern rejects geo");
        let PlotlySchemaGenError::SchemaParseError { path, message } = error else {
            panic!("expected SchemaParseError, got {error:?}");
        };
        assert_eq!("/geo", path);
        assert!(message.contains("`geo`"), "got: {message}");
    }

    #[test]
    fn polymorphic_collections_delegate_per_element() {
        let registry: Registry = encoded(&serde_json::json!({
            "transforms": { "items": { "transform": { "editType": "calc" } } }
        }))
        .expect("encode");
        let field: &FieldDescriptor = &registry.get("Root").expect("Root").fields()[0];
        assert_eq!(FieldType::Polymorphic(Family::Transform), field.ty);
        assert_eq!(
            Some(EncodeStrategy::DelegateSequence),
            field.custom_encoding.as_ref().map(|e| e.strategy.clone())
        );
    }

    #[test]
    fn deprecated_fields_sort_last() {
        let registry: Registry = encoded(&serde_json::json!({
            "_deprecated": { "titlefont": { "valType": "string" } },
            "title": { "valType": "string" },
            "name": { "valType": "string" }
        }))
        .expect("encode");
        let root: &TypeDescriptor = registry.get("Root").expect("Root");
        let order: Vec<&str> = root.fields().iter().map(|f| f.schema_name.as_str()).collect();
        assert_eq!(vec!["title", "name", "titlefont"], order);
    }
}
