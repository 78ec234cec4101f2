//! Type Synthesizer: turns the Schema Model into a [`Registry`] of descriptors.
//!
//! Objects are walked depth-first and registered post-order, so every nested
//! type exists before the field that references it.

use crate::descriptor::{
    CaseValue, DefaultExpr, EnumCase, Family, FieldDescriptor, FieldType, FlagCase, Registry,
    StructRole, TypeDescriptor, TypeShape,
};
use crate::error::PlotlySchemaGenError;
use crate::json_pointer::SchemaPath;
use crate::naming;
use crate::schema::{
    CollectionElement, EnumValue, LeafAttribute, NodeKind, ObjectRole, SchemaNode, ValueType,
    strip_regex_delimiters,
};
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Build the descriptor registry for a parsed schema.
///
/// For a plot schema document every trace, the layout, every transform and
/// the frame element become top-level types; a bare attribute tree becomes a
/// single top-level type named after the root node.
///
/// # Errors
///
/// Returns `NamingCollisionError` when two nodes map to the same type name or
/// two attributes of one object map to the same field name.
pub fn synthesize(root: &SchemaNode) -> Result<Registry, PlotlySchemaGenError> {
    let mut synthesizer: Synthesizer = Synthesizer {
        registry: Registry::new(),
    };

    if root.is_plot_document() {
        for child in root.children() {
            synthesizer.synthesize_top_level(child)?;
        }
    } else {
        synthesizer.synthesize_object(
            root.children(),
            &root.name,
            &SchemaPath::root(),
            None,
            StructRole::Plain,
            root.description.clone(),
        )?;
    }

    tracing::debug!(types = synthesizer.registry.len(), "synthesized type descriptors");
    Ok(synthesizer.registry)
}

struct Synthesizer {
    registry: Registry,
}

impl Synthesizer {
    fn synthesize_top_level(&mut self, node: &SchemaNode) -> Result<(), PlotlySchemaGenError> {
        let type_name: String = naming::to_type_name(&node.name);
        match (&node.kind, node.role()) {
            (_, Some(ObjectRole::Trace { type_tag, animatable })) => {
                let path: SchemaPath = SchemaPath::root()
                    .child("traces")
                    .child(&node.name)
                    .child("attributes");
                self.synthesize_object(
                    node.children(),
                    &type_name,
                    &path,
                    None,
                    StructRole::Trace {
                        type_tag: type_tag.clone(),
                        animatable: *animatable,
                    },
                    node.description.clone(),
                )
            }
            (_, Some(ObjectRole::Transform { type_tag })) => {
                let path: SchemaPath = SchemaPath::root()
                    .child("transforms")
                    .child(&node.name)
                    .child("attributes");
                self.synthesize_object(
                    node.children(),
                    &type_name,
                    &path,
                    None,
                    StructRole::Transform {
                        type_tag: type_tag.clone(),
                    },
                    node.description.clone(),
                )
            }
            (NodeKind::Collection(collection), _) => {
                let path: SchemaPath = SchemaPath::root().child(&node.name).child("items");
                match &collection.element {
                    CollectionElement::Object(element) => self.synthesize_object(
                        element.children(),
                        &naming::to_type_name(&naming::singular(&node.name)),
                        &path.child(&element.name),
                        None,
                        StructRole::Plain,
                        element.description.clone().or_else(|| node.description.clone()),
                    ),
                    CollectionElement::Opaque { name } => Err(PlotlySchemaGenError::parse(
                        path.child(name).as_str(),
                        "top-level collection element must declare attributes",
                    )),
                }
            }
            _ => {
                let path: SchemaPath = if node.name == "layout" {
                    SchemaPath::root().child("layout").child("layoutAttributes")
                } else {
                    SchemaPath::root().child(&node.name)
                };
                self.synthesize_object(
                    node.children(),
                    &type_name,
                    &path,
                    None,
                    StructRole::Plain,
                    node.description.clone(),
                )
            }
        }
    }

    fn synthesize_object(
        &mut self,
        children: &[SchemaNode],
        type_name: &str,
        path: &SchemaPath,
        owner: Option<&str>,
        role: StructRole,
        description: Option<String>,
    ) -> Result<(), PlotlySchemaGenError> {
        let mut fields: Vec<FieldDescriptor> = Vec::with_capacity(children.len());
        let mut field_paths: HashMap<String, SchemaPath> = HashMap::new();

        for child in children {
            let child_path: SchemaPath = if child.deprecated {
                path.child("_deprecated").child(&child.name)
            } else {
                path.child(&child.name)
            };
            let field: FieldDescriptor = self.synthesize_field(child, type_name, &child_path)?;
            if let Some(first) = field_paths.get(&field.field_name) {
                return Err(PlotlySchemaGenError::NamingCollisionError {
                    name: format!("{type_name}.{}", field.field_name),
                    first_path: first.to_string(),
                    second_path: child_path.to_string(),
                });
            }
            field_paths.insert(field.field_name.clone(), child_path);
            fields.push(field);
        }

        self.registry.insert(TypeDescriptor {
            type_name: type_name.to_string(),
            schema_path: path.to_string(),
            description,
            owner: owner.map(String::from),
            shape: TypeShape::Struct { role, fields },
        })
    }

    fn synthesize_field(
        &mut self,
        child: &SchemaNode,
        parent_type: &str,
        path: &SchemaPath,
    ) -> Result<FieldDescriptor, PlotlySchemaGenError> {
        let mut field: FieldDescriptor = FieldDescriptor {
            field_name: naming::to_field_name(&child.name),
            schema_name: child.name.clone(),
            wire_key: None,
            ty: FieldType::Any,
            optional: true,
            is_array: false,
            default_expression: None,
            custom_encoding: None,
            description: child.description.clone(),
            deprecated: child.deprecated,
        };

        match &child.kind {
            NodeKind::Leaf(leaf) => self.synthesize_leaf(&mut field, leaf, parent_type, path)?,
            NodeKind::Object(_) => {
                let nested: String = naming::nested_type_name(parent_type, &child.name);
                self.synthesize_object(
                    child.children(),
                    &nested,
                    path,
                    Some(parent_type),
                    StructRole::Plain,
                    child.description.clone(),
                )?;
                if child.role() == Some(&ObjectRole::Subplot) {
                    field.ty = FieldType::Subplots(nested);
                    field.optional = false;
                    field.default_expression = Some(DefaultExpr::TypeDefault);
                } else {
                    field.ty = FieldType::Named(nested);
                }
            }
            NodeKind::Collection(collection) => {
                field.is_array = true;
                field.ty = match &collection.element {
                    CollectionElement::Object(element) => {
                        let nested: String = naming::nested_type_name(
                            parent_type,
                            &naming::singular(&child.name),
                        );
                        self.synthesize_object(
                            element.children(),
                            &nested,
                            &path.child("items").child(&element.name),
                            Some(parent_type),
                            StructRole::Plain,
                            element.description.clone(),
                        )?;
                        FieldType::Named(nested)
                    }
                    CollectionElement::Opaque { name } => match name.as_str() {
                        "trace" => FieldType::Polymorphic(Family::Trace),
                        "transform" => FieldType::Polymorphic(Family::Transform),
                        _ => FieldType::Any,
                    },
                };
            }
        }
        Ok(field)
    }

    fn synthesize_leaf(
        &mut self,
        field: &mut FieldDescriptor,
        leaf: &LeafAttribute,
        parent_type: &str,
        path: &SchemaPath,
    ) -> Result<(), PlotlySchemaGenError> {
        let (ty, is_array): (FieldType, bool) = match &leaf.value_type {
            ValueType::InfoArray { item } => {
                let item_type: FieldType = item
                    .as_deref()
                    .and_then(scalar_field_type)
                    .unwrap_or(FieldType::Any);
                (item_type, true)
            }
            ValueType::Enumerated(values) if is_boolean_pair(values) => (FieldType::Bool, false),
            ValueType::Enumerated(values) => {
                let enum_name: String = naming::nested_type_name(parent_type, &field.schema_name);
                self.register_enum(&enum_name, values, field.description.clone(), path, parent_type)?;
                (FieldType::Named(enum_name), false)
            }
            ValueType::FlagList { flags, extras } => {
                let flags_name: String = naming::nested_type_name(parent_type, &field.schema_name);
                self.register_flags(
                    &flags_name,
                    flags,
                    extras,
                    field.description.clone(),
                    path,
                    parent_type,
                )?;
                (FieldType::Named(flags_name), false)
            }
            ValueType::Angle if leaf.default.as_ref().is_some_and(Value::is_string) => {
                let keyword: &str = leaf.default.as_ref().and_then(Value::as_str).unwrap_or_default();
                let angle_name: String = naming::nested_type_name(parent_type, &field.schema_name);
                self.register_angle(&angle_name, keyword, field.description.clone(), path, parent_type)?;
                (FieldType::Named(angle_name), false)
            }
            ValueType::SubplotId => (
                FieldType::SubplotRef {
                    base: subplot_base(leaf, &field.schema_name),
                    pattern: leaf.regex.clone(),
                },
                false,
            ),
            scalar => (scalar_field_type(scalar).unwrap_or(FieldType::Any), false),
        };

        field.is_array = is_array;
        field.ty = if leaf.array_ok && !is_array {
            FieldType::Data(Box::new(ty))
        } else {
            ty
        };

        if leaf.required {
            field.optional = false;
            field.default_expression = Some(self.default_for(field, leaf));
        }
        Ok(())
    }

    /// Literal start value of a required field, from the schema's `dflt`
    /// when it fits the field type.
    fn default_for(&self, field: &FieldDescriptor, leaf: &LeafAttribute) -> DefaultExpr {
        if field.is_array {
            return DefaultExpr::EmptyVec;
        }
        let scalar: &FieldType = match &field.ty {
            FieldType::Data(inner) => inner,
            other => other,
        };
        let Some(dflt) = &leaf.default else {
            return match scalar {
                FieldType::SubplotRef { .. } => DefaultExpr::Subplot(1),
                _ => DefaultExpr::TypeDefault,
            };
        };

        let literal: Option<DefaultExpr> = match (scalar, dflt) {
            (FieldType::Bool, Value::Bool(b)) => Some(DefaultExpr::Bool(*b)),
            (FieldType::Number, Value::Number(n)) => n.as_f64().map(DefaultExpr::Number),
            (FieldType::Integer, Value::Number(n)) => n.as_i64().map(DefaultExpr::Integer),
            (FieldType::String | FieldType::Color, Value::String(s)) => {
                Some(DefaultExpr::Str(s.clone()))
            }
            (FieldType::SubplotRef { base, .. }, Value::String(s)) => {
                Some(DefaultExpr::Subplot(subplot_index(base, s)))
            }
            (FieldType::Named(type_name), value) => self.enum_case_for(type_name, value),
            _ => None,
        };
        literal.unwrap_or(DefaultExpr::TypeDefault)
    }

    fn enum_case_for(&self, type_name: &str, value: &Value) -> Option<DefaultExpr> {
        let descriptor: &TypeDescriptor = self.registry.get(type_name)?;
        let TypeShape::Enum(cases) = &descriptor.shape else {
            return None;
        };
        cases
            .iter()
            .find(|case| matches!(&case.value, CaseValue::Literal(literal) if literal.to_json() == *value))
            .map(|case| DefaultExpr::EnumCase {
                type_name: type_name.to_string(),
                case: case.name.clone(),
            })
    }

    fn register_enum(
        &mut self,
        type_name: &str,
        values: &[EnumValue],
        description: Option<String>,
        path: &SchemaPath,
        owner: &str,
    ) -> Result<(), PlotlySchemaGenError> {
        let mut case_values: Vec<CaseValue> = Vec::new();
        for value in values {
            match value {
                EnumValue::String(pattern) if is_regex_value(pattern) => {
                    case_values.extend(subplot_cases(pattern, value));
                }
                literal => case_values.push(CaseValue::Literal(literal.clone())),
            }
        }
        self.insert_enum(type_name, case_values, description, path, owner)
    }

    /// An angle that also takes a keyword (`"auto"`): the keyword or any number
    /// of degrees.
    fn register_angle(
        &mut self,
        type_name: &str,
        keyword: &str,
        description: Option<String>,
        path: &SchemaPath,
        owner: &str,
    ) -> Result<(), PlotlySchemaGenError> {
        let case_values: Vec<CaseValue> = vec![
            CaseValue::Literal(EnumValue::String(keyword.to_string())),
            CaseValue::Number,
        ];
        self.insert_enum(type_name, case_values, description, path, owner)
    }

    fn insert_enum(
        &mut self,
        type_name: &str,
        case_values: Vec<CaseValue>,
        description: Option<String>,
        path: &SchemaPath,
        owner: &str,
    ) -> Result<(), PlotlySchemaGenError> {
        let names: Vec<String> = case_values.iter().map(case_name).collect();
        let cases: Vec<EnumCase> = naming::disambiguate(names)
            .into_iter()
            .zip(case_values)
            .map(|(name, value)| EnumCase { name, value })
            .collect();

        self.registry.insert(TypeDescriptor {
            type_name: type_name.to_string(),
            schema_path: path.to_string(),
            description,
            owner: Some(owner.to_string()),
            shape: TypeShape::Enum(cases),
        })
    }

    fn register_flags(
        &mut self,
        type_name: &str,
        flags: &[String],
        extras: &[String],
        description: Option<String>,
        path: &SchemaPath,
        owner: &str,
    ) -> Result<(), PlotlySchemaGenError> {
        let wires: Vec<(&String, bool)> = flags
            .iter()
            .map(|flag| (flag, false))
            .chain(extras.iter().map(|extra| (extra, true)))
            .collect();
        let names: Vec<String> = naming::disambiguate(
            wires
                .iter()
                .map(|(wire, _)| naming::to_flag_constant(wire))
                .collect(),
        );
        let cases: Vec<FlagCase> = names
            .into_iter()
            .zip(wires)
            .map(|(name, (wire, extra))| FlagCase {
                name,
                wire: wire.clone(),
                extra,
            })
            .collect();

        self.registry.insert(TypeDescriptor {
            type_name: type_name.to_string(),
            schema_path: path.to_string(),
            description,
            owner: Some(owner.to_string()),
            shape: TypeShape::Flags(cases),
        })
    }
}

/// Field type for value types that need no generated declaration.
fn scalar_field_type(value_type: &ValueType) -> Option<FieldType> {
    let ty: FieldType = match value_type {
        ValueType::Boolean => FieldType::Bool,
        ValueType::Number | ValueType::Angle => FieldType::Number,
        ValueType::Integer => FieldType::Integer,
        ValueType::String => FieldType::String,
        ValueType::Color => FieldType::Color,
        ValueType::ColorList => FieldType::ColorList,
        ValueType::ColorScale => FieldType::ColorScale,
        ValueType::DataArray => FieldType::DataArray,
        ValueType::Any => FieldType::Any,
        ValueType::InfoArray { .. }
        | ValueType::Enumerated(_)
        | ValueType::FlagList { .. }
        | ValueType::SubplotId => return None,
    };
    Some(ty)
}

fn case_name(value: &CaseValue) -> String {
    match value {
        CaseValue::Literal(EnumValue::String(s)) => naming::to_variant_name(s),
        CaseValue::Literal(EnumValue::Bool(true)) => "True".to_string(),
        CaseValue::Literal(EnumValue::Bool(false)) => "False".to_string(),
        CaseValue::Literal(EnumValue::Number(n)) => naming::numeric_variant_name(&n.to_string()),
        CaseValue::Subplot { base, domain: false } => naming::to_type_name(base),
        CaseValue::Subplot { base, domain: true } => {
            format!("{}Domain", naming::to_type_name(base))
        }
        CaseValue::Number => "Degrees".to_string(),
    }
}

/// Plotly writes "any subplot of this kind" as a `/.../` regular expression
/// among the enumerated values.
fn is_regex_value(value: &str) -> bool {
    value.len() > 2 && value.starts_with('/') && value.ends_with('/')
}

/// Cases for a subplot pattern such as `/^x([2-9]|[1-9][0-9]+)?( domain)?$/`:
/// the subplot itself and, when the pattern allows it, its domain. A pattern
/// without a literal prefix stays a literal case.
fn subplot_cases(pattern: &str, literal: &EnumValue) -> Vec<CaseValue> {
    let body: String = strip_regex_delimiters(pattern);
    let base: String = body
        .trim_start_matches('^')
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect();
    if base.is_empty() {
        return vec![CaseValue::Literal(literal.clone())];
    }
    let mut cases: Vec<CaseValue> = vec![CaseValue::Subplot {
        base: base.clone(),
        domain: false,
    }];
    if body.contains(" domain") {
        cases.push(CaseValue::Subplot { base, domain: true });
    }
    cases
}

/// `[true, false]` in either order carries no third state.
fn is_boolean_pair(values: &[EnumValue]) -> bool {
    values.len() == 2
        && values.contains(&EnumValue::Bool(true))
        && values.contains(&EnumValue::Bool(false))
}

/// Subplot base from `dflt` (`"x2"` → `"x"`), else from the regex's literal
/// prefix, else the attribute name.
fn subplot_base(leaf: &LeafAttribute, schema_name: &str) -> String {
    if let Some(Value::String(dflt)) = &leaf.default {
        let base: &str = dflt.trim_end_matches(|c: char| c.is_ascii_digit());
        if !base.is_empty() {
            return base.to_string();
        }
    }
    if let Some(regex) = &leaf.regex {
        let prefix: String = regex
            .trim_start_matches('^')
            .chars()
            .take_while(char::is_ascii_alphabetic)
            .collect();
        if !prefix.is_empty() {
            return prefix;
        }
    }
    schema_name.to_string()
}

fn subplot_index(base: &str, wire: &str) -> u32 {
    wire.strip_prefix(base)
        .and_then(|suffix| suffix.parse::<u32>().ok())
        .unwrap_or(1)
}

/// Hoist structurally identical enumerations that share an attribute name into
/// one top-level type named after the attribute (`Visible`), when that name is
/// not taken.
pub fn share_identical_enums(registry: &mut Registry) {
    struct Group {
        schema_name: String,
        cases: Vec<EnumCase>,
        members: Vec<String>,
    }

    let mut groups: Vec<Group> = Vec::new();
    for descriptor in registry.iter() {
        for field in descriptor.fields() {
            let Some(enum_name) = field.ty.named() else {
                continue;
            };
            let Some(TypeShape::Enum(cases)) = registry.get(enum_name).map(|t| &t.shape) else {
                continue;
            };
            match groups
                .iter_mut()
                .find(|g| g.schema_name == field.schema_name && g.cases == *cases)
            {
                Some(group) => {
                    if !group.members.iter().any(|m| m == enum_name) {
                        group.members.push(enum_name.to_string());
                    }
                }
                None => groups.push(Group {
                    schema_name: field.schema_name.clone(),
                    cases: cases.clone(),
                    members: vec![enum_name.to_string()],
                }),
            }
        }
    }

    let mut claimed: HashSet<String> = HashSet::new();
    let mut hoisted: usize = 0;
    for group in groups.into_iter().filter(|g| g.members.len() > 1) {
        let shared_name: String = naming::to_type_name(&group.schema_name);
        if registry.contains(&shared_name) || !claimed.insert(shared_name.clone()) {
            continue;
        }
        let Some(first) = registry.get(&group.members[0]) else {
            continue;
        };
        let shared: TypeDescriptor = TypeDescriptor {
            type_name: shared_name.clone(),
            schema_path: first.schema_path.clone(),
            description: first.description.clone(),
            owner: None,
            shape: TypeShape::Enum(group.cases),
        };
        let removed: HashSet<String> = group.members.into_iter().collect();
        registry.replace_types(&removed, &shared_name);
        if registry.insert(shared).is_ok() {
            hoisted += 1;
        }
    }
    tracing::debug!(hoisted, "shared identical enumerations");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    fn registry_for(json: &serde_json::Value) -> Registry {
        let root: SchemaNode = schema::parse_document(json, "Root").expect("parse");
        synthesize(&root).expect("synthesize")
    }

    #[test]
    fn array_ok_number_becomes_data() {
        let registry: Registry = registry_for(&serde_json::json!({
            "r": { "arrayOk": true, "type": "number" }
        }));
        let root: &TypeDescriptor = registry.get("Root").expect("Root");
        let r: &FieldDescriptor = root.field("r").expect("r");
        assert_eq!(FieldType::Data(Box::new(FieldType::Number)), r.ty);
        assert!(r.optional);
        assert_eq!("r", r.field_name);
    }

    #[test]
    fn nested_objects_are_registered_before_parents() {
        let registry: Registry = registry_for(&serde_json::json!({
            "marker": {
                "colorbar": { "len": { "valType": "number" } },
                "size": { "valType": "number" }
            }
        }));
        let names: Vec<&str> = registry.iter().map(|t| t.type_name.as_str()).collect();
        assert_eq!(vec!["RootMarkerColorBar", "RootMarker", "Root"], names);
        assert_eq!(
            Some("RootMarker"),
            registry.get("RootMarkerColorBar").and_then(|t| t.owner.as_deref())
        );
    }

    #[test]
    fn enumerated_leaf_registers_enum_with_ordered_cases() {
        let registry: Registry = registry_for(&serde_json::json!({
            "side": { "valType": "enumerated", "values": ["left", "right", "auto"] }
        }));
        let side: &TypeDescriptor = registry.get("RootSide").expect("RootSide");
        let TypeShape::Enum(cases) = &side.shape else {
            panic!("RootSide should be an enum");
        };
        let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec!["Left", "Right", "Auto"], names);
    }

    #[test]
    fn boolean_pair_collapses_but_tri_state_does_not() {
        let registry: Registry = registry_for(&serde_json::json!({
            "flag": { "valType": "enumerated", "values": [true, false] },
            "visible": { "valType": "enumerated", "values": [true, false, "legendonly"] }
        }));
        let root: &TypeDescriptor = registry.get("Root").expect("Root");
        assert_eq!(FieldType::Bool, root.field("flag").expect("flag").ty);
        assert_eq!(
            FieldType::Named("RootVisible".to_string()),
            root.field("visible").expect("visible").ty
        );
    }

    #[test]
    fn collections_use_singular_element_names() {
        let registry: Registry = registry_for(&serde_json::json!({
            "annotations": { "items": { "annotation": { "text": { "valType": "string" } } } },
            "transforms": { "items": { "transform": { "editType": "calc" } } }
        }));
        let root: &TypeDescriptor = registry.get("Root").expect("Root");
        let annotations: &FieldDescriptor = root.field("annotations").expect("annotations");
        assert!(annotations.is_array);
        assert_eq!(FieldType::Named("RootAnnotation".to_string()), annotations.ty);
        let transforms: &FieldDescriptor = root.field("transforms").expect("transforms");
        assert_eq!(FieldType::Polymorphic(Family::Transform), transforms.ty);
        assert!(transforms.is_array);
    }

    #[test]
    fn required_fields_get_defaults() {
        let registry: Registry = registry_for(&serde_json::json!({
            "xaxis": { "valType": "subplotid", "dflt": "x2", "regex": "/^x([2-9]|[1-9][0-9]+)?$/" },
            "mode": { "valType": "enumerated", "values": ["lines", "markers"], "dflt": "markers", "required": true },
            "opacity": { "valType": "number", "dflt": 0.5, "required": true }
        }));
        let root: &TypeDescriptor = registry.get("Root").expect("Root");
        let xaxis: &FieldDescriptor = root.field("xaxis").expect("xaxis");
        assert!(!xaxis.optional);
        assert_eq!(Some(DefaultExpr::Subplot(2)), xaxis.default_expression);
        assert_eq!(
            FieldType::SubplotRef {
                base: "x".to_string(),
                pattern: Some("^x([2-9]|[1-9][0-9]+)?$".to_string())
            },
            xaxis.ty
        );
        assert_eq!(
            Some(DefaultExpr::EnumCase {
                type_name: "RootMode".to_string(),
                case: "Markers".to_string()
            }),
            root.field("mode").expect("mode").default_expression
        );
        assert_eq!(
            Some(DefaultExpr::Number(0.5)),
            root.field("opacity").expect("opacity").default_expression
        );
    }

    #[test]
    fn info_array_becomes_vec() {
        let registry: Registry = registry_for(&serde_json::json!({
            "range": { "valType": "info_array", "items": [{ "valType": "number" }, { "valType": "number" }] }
        }));
        let range: &FieldDescriptor = registry
            .get("Root")
            .and_then(|t| t.field("range"))
            .expect("range");
        assert_eq!(FieldType::Number, range.ty);
        assert!(range.is_array);
    }

    #[test]
    fn field_name_collision_is_reported() {
        let root: SchemaNode = schema::parse_document(
            &serde_json::json!({
                "xaxis": { "valType": "string" },
                "x_axis": { "valType": "string" }
            }),
            "Root",
        )
        .expect("parse");
        let error: PlotlySchemaGenError = synthesize(&root).expect_err("collision");
        let PlotlySchemaGenError::NamingCollisionError {
            name,
            first_path,
            second_path,
        } = error
        else {
            panic!("expected NamingCollisionError, got {error:?}");
        };
        assert_eq!("Root.x_axis", name);
        assert_eq!("/xaxis", first_path);
        assert_eq!("/x_axis", second_path);
    }

    #[test]
    fn type_name_collision_is_reported() {
        let root: SchemaNode = schema::parse_document(
            &serde_json::json!({
                "markerline": { "width": { "valType": "number" } },
                "marker": { "line": { "width": { "valType": "number" } } }
            }),
            "Root",
        )
        .expect("parse");
        let error: PlotlySchemaGenError = synthesize(&root).expect_err("collision");
        assert!(
            matches!(error, PlotlySchemaGenError::NamingCollisionError { ref name, .. } if name == "RootMarkerLine"),
            "got {error:?}"
        );
    }

    #[test]
    fn identical_enums_are_shared() {
        let root: SchemaNode = schema::parse_document(
            &serde_json::json!({
                "traces": {
                    "scatter": { "attributes": { "visible": { "valType": "enumerated", "values": [true, false, "legendonly"] } } },
                    "bar": { "attributes": { "visible": { "valType": "enumerated", "values": [true, false, "legendonly"] } } }
                }
            }),
            "Root",
        )
        .expect("parse");
        let mut registry: Registry = synthesize(&root).expect("synthesize");
        share_identical_enums(&mut registry);
        assert!(registry.contains("Visible"));
        assert!(!registry.contains("ScatterVisible"));
        assert!(!registry.contains("BarVisible"));
        for trace in ["Scatter", "Bar"] {
            let visible: &FieldDescriptor = registry
                .get(trace)
                .and_then(|t| t.field("visible"))
                .expect("visible");
            assert_eq!(Some("Visible"), visible.ty.named());
        }
    }

    #[test]
    fn subplot_patterns_among_values_become_reference_cases() {
        let registry: Registry = registry_for(&serde_json::json!({
            "xref": {
                "valType": "enumerated",
                "values": ["paper", "/^x([2-9]|[1-9][0-9]+)?( domain)?$/"]
            }
        }));
        let xref: &TypeDescriptor = registry.get("RootXRef").expect("RootXRef");
        let TypeShape::Enum(cases) = &xref.shape else {
            panic!("RootXRef should be an enum");
        };
        let expected: Vec<EnumCase> = vec![
            EnumCase {
                name: "Paper".to_string(),
                value: CaseValue::Literal(EnumValue::String("paper".to_string())),
            },
            EnumCase {
                name: "X".to_string(),
                value: CaseValue::Subplot {
                    base: "x".to_string(),
                    domain: false,
                },
            },
            EnumCase {
                name: "XDomain".to_string(),
                value: CaseValue::Subplot {
                    base: "x".to_string(),
                    domain: true,
                },
            },
        ];
        assert_eq!(&expected, cases);
    }

    #[test]
    fn angle_with_keyword_default_takes_keyword_or_degrees() {
        let registry: Registry = registry_for(&serde_json::json!({
            "textangle": { "valType": "angle", "dflt": "auto", "required": true },
            "tickangle": { "valType": "angle", "dflt": 0 }
        }));
        let root: &TypeDescriptor = registry.get("Root").expect("Root");
        let text_angle: &FieldDescriptor = root.field("textangle").expect("textangle");
        assert_eq!(FieldType::Named("RootTextAngle".to_string()), text_angle.ty);
        assert_eq!(
            Some(DefaultExpr::EnumCase {
                type_name: "RootTextAngle".to_string(),
                case: "Auto".to_string(),
            }),
            text_angle.default_expression
        );
        assert_eq!(FieldType::Number, root.field("tickangle").expect("tickangle").ty);

        let TypeShape::Enum(cases) = &registry.get("RootTextAngle").expect("enum").shape else {
            panic!("RootTextAngle should be an enum");
        };
        let names: Vec<&str> = cases.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec!["Auto", "Degrees"], names);
        assert_eq!(CaseValue::Number, cases[1].value);
    }

    #[test]
    fn subplot_objects_become_numbered_collections() {
        let registry: Registry = registry_for(&serde_json::json!({
            "xaxis": { "range": { "valType": "number" }, "_isSubplotObj": true, "role": "object" },
            "title": { "text": { "valType": "string" }, "role": "object" }
        }));
        let root: &TypeDescriptor = registry.get("Root").expect("Root");
        let x_axis: &FieldDescriptor = root.field("xaxis").expect("xaxis");
        assert_eq!(FieldType::Subplots("RootXAxis".to_string()), x_axis.ty);
        assert!(!x_axis.optional);
        assert_eq!(Some(DefaultExpr::TypeDefault), x_axis.default_expression);
        let title: &FieldDescriptor = root.field("title").expect("title");
        assert_eq!(FieldType::Named("RootTitle".to_string()), title.ty);
        assert!(title.optional);
    }
}
