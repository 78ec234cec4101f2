//! Schema Model: the in-memory tree of a Plotly schema document.
//!
//! The tree is built once by [`parse`] and is immutable afterwards. Object
//! children keep document order (serde_json is built with `preserve_order`),
//! which is what keeps generated field and enum-case order stable between runs.

use crate::error::PlotlySchemaGenError;
use crate::json_pointer::SchemaPath;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Hard cap on `flags` + `extras`; flag lists are emitted as a `u64` bit set.
pub(crate) const MAX_FLAGS: usize = 64;

/// One declaration of the upstream schema: a leaf attribute, an object or a
/// collection of objects.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    /// Wire key exactly as the schema spells it.
    pub name: String,
    pub kind: NodeKind,
    pub description: Option<String>,
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Leaf(LeafAttribute),
    Object(ObjectNode),
    Collection(CollectionNode),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeafAttribute {
    pub value_type: ValueType,
    /// A per-point array is accepted in place of the scalar.
    pub array_ok: bool,
    /// Always present on the wire.
    pub required: bool,
    /// The schema's `dflt`, verbatim.
    pub default: Option<Value>,
    /// Pattern for `subplotid` attributes, without the surrounding slashes.
    pub regex: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValueType {
    Boolean,
    Number,
    Integer,
    String,
    Color,
    ColorList,
    ColorScale,
    Angle,
    Any,
    DataArray,
    /// Fixed-shape list; `item` is set when every element shares one type.
    InfoArray { item: Option<Box<ValueType>> },
    /// Closed value set in declaration order.
    Enumerated(Vec<EnumValue>),
    FlagList {
        flags: Vec<String>,
        extras: Vec<String>,
    },
    SubplotId,
}

/// One literal of an enumerated attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumValue {
    String(String),
    Bool(bool),
    Number(serde_json::Number),
}

impl EnumValue {
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::String(s.clone())),
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::Number(n.clone())),
            _ => None,
        }
    }

    /// The value as it appears on the wire.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectNode {
    pub role: ObjectRole,
    pub children: Vec<SchemaNode>,
}

/// What an object node stands for beyond its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectRole {
    /// Pseudo-object of a plot schema document; its children are top-level types.
    Root,
    Plain,
    Trace { type_tag: String, animatable: bool },
    Transform { type_tag: String },
    /// Declares every numbered instance at once (`xaxis` for `xaxis2`, ...).
    Subplot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionNode {
    pub element: CollectionElement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CollectionElement {
    Object(Box<SchemaNode>),
    /// Element declared without attributes: a reference to a polymorphic family
    /// (e.g. `transform`) whose concrete shapes are declared elsewhere.
    Opaque { name: String },
}

impl SchemaNode {
    /// Attributes of an object node, or of a collection's object element.
    #[must_use]
    pub fn children(&self) -> &[SchemaNode] {
        match &self.kind {
            NodeKind::Object(object) => &object.children,
            NodeKind::Collection(CollectionNode {
                element: CollectionElement::Object(element),
            }) => element.children(),
            _ => &[],
        }
    }

    /// Walks attribute names from this node; collections are stepped through
    /// transparently, so `["frames", "data"]` reaches the frame's `data` leaf.
    #[must_use]
    pub fn find(&self, segments: &[&str]) -> Option<&SchemaNode> {
        let Some((first, rest)) = segments.split_first() else {
            return Some(self);
        };
        let child: &SchemaNode = self.children().iter().find(|c| c.name == *first)?;
        child.find(rest)
    }

    #[must_use]
    pub fn role(&self) -> Option<&ObjectRole> {
        match &self.kind {
            NodeKind::Object(object) => Some(&object.role),
            _ => None,
        }
    }

    /// True for the root of a full plot schema document.
    #[must_use]
    pub fn is_plot_document(&self) -> bool {
        matches!(self.role(), Some(ObjectRole::Root))
    }
}

#[derive(Debug, Default, Deserialize)]
struct MetaBlock {
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TraceDefinition {
    #[serde(default, rename = "type")]
    type_tag: Option<String>,
    #[serde(default)]
    animatable: bool,
    attributes: Value,
    /// Attributes the trace adds to the layout (`barmode` for bar traces).
    #[serde(default, rename = "layoutAttributes")]
    layout_attributes: Option<Value>,
    #[serde(default)]
    meta: Option<MetaBlock>,
}

#[derive(Debug, Deserialize)]
struct TransformDefinition {
    attributes: Value,
    #[serde(default)]
    meta: Option<MetaBlock>,
}

#[derive(Debug, Deserialize)]
struct LayoutDefinition {
    #[serde(rename = "layoutAttributes")]
    layout_attributes: Value,
}

/// Parse a schema document from JSON text.
///
/// # Errors
///
/// Returns `JsonError` for malformed JSON and `SchemaParseError` for any
/// unrecognized shape.
pub fn parse(schema_json: &str, root_name: &str) -> Result<SchemaNode, PlotlySchemaGenError> {
    let value: Value = serde_json::from_str(schema_json)?;
    parse_document(&value, root_name)
}

/// Parse an already-decoded schema document.
///
/// A document with a `traces` key (or `layout.layoutAttributes`) is read as a
/// full plot schema; anything else is read as a bare attribute tree whose root
/// becomes a type called `root_name`.
///
/// # Errors
///
/// Returns `SchemaParseError` naming the offending path.
pub fn parse_document(value: &Value, root_name: &str) -> Result<SchemaNode, PlotlySchemaGenError> {
    let Value::Object(map) = value else {
        return Err(PlotlySchemaGenError::parse(
            "",
            "schema root must be an object",
        ));
    };

    if is_plot_schema_document(map) {
        return parse_plot_schema(map);
    }

    let children: Vec<SchemaNode> = parse_children(map, &SchemaPath::root())?;
    Ok(SchemaNode {
        name: root_name.to_string(),
        kind: NodeKind::Object(ObjectNode {
            role: ObjectRole::Plain,
            children,
        }),
        description: None,
        deprecated: false,
    })
}

pub(crate) fn is_plot_schema_document(map: &Map<String, Value>) -> bool {
    map.contains_key("traces")
        || map
            .get("layout")
            .and_then(Value::as_object)
            .is_some_and(|layout| layout.contains_key("layoutAttributes"))
}

fn parse_plot_schema(map: &Map<String, Value>) -> Result<SchemaNode, PlotlySchemaGenError> {
    let root: SchemaPath = SchemaPath::root();
    let mut children: Vec<SchemaNode> = Vec::new();
    let mut trace_layout: Vec<(SchemaNode, SchemaPath)> = Vec::new();

    if let Some(traces) = map.get("traces") {
        let traces_path: SchemaPath = root.child("traces");
        let Value::Object(traces) = traces else {
            return Err(PlotlySchemaGenError::parse(
                traces_path.as_str(),
                "`traces` must be an object",
            ));
        };
        for (name, definition) in traces {
            let path: SchemaPath = traces_path.child(name);
            let trace: TraceDefinition = decode_envelope(definition, &path)?;
            let attributes_path: SchemaPath = path.child("attributes");
            let attributes: &Map<String, Value> =
                expect_object(&trace.attributes, &attributes_path)?;
            if let Some(layout_attributes) = &trace.layout_attributes {
                let layout_path: SchemaPath = path.child("layoutAttributes");
                let contributed: &Map<String, Value> =
                    expect_object(layout_attributes, &layout_path)?;
                for node in parse_children(contributed, &layout_path)? {
                    let node_path: SchemaPath = layout_path.child(&node.name);
                    trace_layout.push((node, node_path));
                }
            }
            children.push(SchemaNode {
                name: name.clone(),
                kind: NodeKind::Object(ObjectNode {
                    role: ObjectRole::Trace {
                        type_tag: trace.type_tag.unwrap_or_else(|| name.clone()),
                        animatable: trace.animatable,
                    },
                    children: parse_children(attributes, &attributes_path)?,
                }),
                description: trace.meta.and_then(|meta| meta.description),
                deprecated: false,
            });
        }
    }

    let mut layout_children: Option<Vec<SchemaNode>> = None;
    if let Some(layout) = map.get("layout") {
        let path: SchemaPath = root.child("layout");
        let layout: LayoutDefinition = decode_envelope(layout, &path)?;
        let attributes_path: SchemaPath = path.child("layoutAttributes");
        let attributes: &Map<String, Value> =
            expect_object(&layout.layout_attributes, &attributes_path)?;
        layout_children = Some(parse_children(attributes, &attributes_path)?);
    }
    if !trace_layout.is_empty() {
        merge_trace_layout(layout_children.get_or_insert_with(Vec::new), trace_layout)?;
    }
    if let Some(layout_children) = layout_children {
        children.push(SchemaNode {
            name: "layout".to_string(),
            kind: NodeKind::Object(ObjectNode {
                role: ObjectRole::Plain,
                children: layout_children,
            }),
            description: None,
            deprecated: false,
        });
    }

    if let Some(transforms) = map.get("transforms") {
        let transforms_path: SchemaPath = root.child("transforms");
        let transforms: &Map<String, Value> = expect_object(transforms, &transforms_path)?;
        for (name, definition) in transforms {
            let path: SchemaPath = transforms_path.child(name);
            let transform: TransformDefinition = decode_envelope(definition, &path)?;
            let attributes_path: SchemaPath = path.child("attributes");
            let attributes: &Map<String, Value> =
                expect_object(&transform.attributes, &attributes_path)?;
            children.push(SchemaNode {
                name: name.clone(),
                kind: NodeKind::Object(ObjectNode {
                    role: ObjectRole::Transform {
                        type_tag: name.clone(),
                    },
                    children: parse_children(attributes, &attributes_path)?,
                }),
                description: transform.meta.and_then(|meta| meta.description),
                deprecated: false,
            });
        }
    }

    if let Some(frames) = map.get("frames") {
        let path: SchemaPath = root.child("frames");
        let node: SchemaNode = parse_declaration("frames", frames, &path, false)?;
        if !matches!(node.kind, NodeKind::Collection(_)) {
            return Err(PlotlySchemaGenError::parse(
                path.as_str(),
                "`frames` must declare its entries under `items`",
            ));
        }
        children.push(node);
    }

    if children.is_empty() {
        return Err(PlotlySchemaGenError::parse(
            "",
            "plot schema declares no traces, layout, transforms or frames",
        ));
    }

    Ok(SchemaNode {
        name: String::new(),
        kind: NodeKind::Object(ObjectNode {
            role: ObjectRole::Root,
            children,
        }),
        description: None,
        deprecated: false,
    })
}

/// Add trace-contributed layout attributes after the layout's own. A
/// declaration several traces share is kept once; two different declarations
/// under one name are an error.
fn merge_trace_layout(
    layout: &mut Vec<SchemaNode>,
    contributed: Vec<(SchemaNode, SchemaPath)>,
) -> Result<(), PlotlySchemaGenError> {
    for (node, path) in contributed {
        match layout.iter().find(|existing| existing.name == node.name) {
            Some(existing) if existing.kind == node.kind => {
                tracing::trace!(attribute = %node.name, "layout attribute already declared");
            }
            Some(_) => {
                return Err(PlotlySchemaGenError::parse(
                    path.as_str(),
                    format!("layout attribute `{}` is declared differently elsewhere", node.name),
                ));
            }
            None => layout.push(node),
        }
    }
    Ok(())
}

fn decode_envelope<T: for<'de> Deserialize<'de>>(
    value: &Value,
    path: &SchemaPath,
) -> Result<T, PlotlySchemaGenError> {
    serde_json::from_value(value.clone())
        .map_err(|e| PlotlySchemaGenError::parse(path.as_str(), e.to_string()))
}

fn expect_object<'a>(
    value: &'a Value,
    path: &SchemaPath,
) -> Result<&'a Map<String, Value>, PlotlySchemaGenError> {
    value
        .as_object()
        .ok_or_else(|| PlotlySchemaGenError::parse(path.as_str(), "expected an object"))
}

/// Keys of an object declaration that describe the object rather than name an attribute.
pub(crate) fn is_metadata_key(key: &str) -> bool {
    key.starts_with('_') || matches!(key, "role" | "description" | "editType" | "impliedEdits")
}

fn description_of(map: &Map<String, Value>) -> Option<String> {
    map.get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

/// A declaration is a leaf when it has `valType`, or a string `type` and no
/// nested declarations.
pub(crate) fn is_leaf_declaration(map: &Map<String, Value>) -> bool {
    if map.contains_key("valType") {
        return true;
    }
    matches!(map.get("type"), Some(Value::String(_)))
        && !map
            .iter()
            .any(|(key, value)| value.is_object() && !is_metadata_key(key) && key != "items")
}

fn parse_declaration(
    name: &str,
    value: &Value,
    path: &SchemaPath,
    deprecated: bool,
) -> Result<SchemaNode, PlotlySchemaGenError> {
    let Value::Object(map) = value else {
        return Err(PlotlySchemaGenError::parse(
            path.as_str(),
            "attribute declaration must be an object",
        ));
    };

    let kind: NodeKind = if is_leaf_declaration(map) {
        NodeKind::Leaf(parse_leaf(map, path)?)
    } else if let Some(items) = map.get("items") {
        NodeKind::Collection(parse_collection(items, &path.child("items"))?)
    } else {
        let role: ObjectRole = if map.get("_isSubplotObj") == Some(&Value::Bool(true)) {
            ObjectRole::Subplot
        } else {
            ObjectRole::Plain
        };
        NodeKind::Object(ObjectNode {
            role,
            children: parse_children(map, path)?,
        })
    };

    Ok(SchemaNode {
        name: name.to_string(),
        kind,
        description: description_of(map),
        deprecated,
    })
}

fn parse_children(
    map: &Map<String, Value>,
    path: &SchemaPath,
) -> Result<Vec<SchemaNode>, PlotlySchemaGenError> {
    let mut children: Vec<SchemaNode> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let mut push = |node: SchemaNode, node_path: &SchemaPath| {
        if seen.insert(node.name.clone()) {
            children.push(node);
            Ok(())
        } else {
            Err(PlotlySchemaGenError::parse(
                node_path.as_str(),
                format!("duplicate attribute `{}`", node.name),
            ))
        }
    };

    for (key, value) in map {
        if key == "_deprecated" {
            let deprecated_path: SchemaPath = path.child(key);
            let deprecated: &Map<String, Value> = expect_object(value, &deprecated_path)?;
            for (name, declaration) in deprecated {
                let node_path: SchemaPath = deprecated_path.child(name);
                push(
                    parse_declaration(name, declaration, &node_path, true)?,
                    &node_path,
                )?;
            }
            continue;
        }
        if is_metadata_key(key) {
            continue;
        }
        if !value.is_object() {
            if key == "type" && value.is_string() {
                // trace attribute maps repeat their own type tag
                continue;
            }
            return Err(PlotlySchemaGenError::parse(
                path.child(key).as_str(),
                "expected an attribute declaration",
            ));
        }
        let node_path: SchemaPath = path.child(key);
        push(parse_declaration(key, value, &node_path, false)?, &node_path)?;
    }

    if children.is_empty() {
        return Err(PlotlySchemaGenError::parse(
            path.as_str(),
            "object declares no attributes",
        ));
    }
    Ok(children)
}

fn parse_collection(
    items: &Value,
    path: &SchemaPath,
) -> Result<CollectionNode, PlotlySchemaGenError> {
    let items: &Map<String, Value> = expect_object(items, path)?;
    let mut entries = items.iter();
    let (Some((element_name, element_value)), None) = (entries.next(), entries.next()) else {
        return Err(PlotlySchemaGenError::parse(
            path.as_str(),
            "`items` must contain exactly one element declaration",
        ));
    };

    let element_path: SchemaPath = path.child(element_name);
    let element_map: &Map<String, Value> = expect_object(element_value, &element_path)?;
    let declares_attributes: bool = element_map
        .iter()
        .any(|(key, value)| key == "_deprecated" || (!is_metadata_key(key) && value.is_object()));

    if !declares_attributes {
        return Ok(CollectionNode {
            element: CollectionElement::Opaque {
                name: element_name.clone(),
            },
        });
    }

    let element: SchemaNode =
        parse_declaration(element_name, element_value, &element_path, false)?;
    if matches!(element.kind, NodeKind::Leaf(_)) {
        return Err(PlotlySchemaGenError::parse(
            element_path.as_str(),
            "collection element must be an object declaration",
        ));
    }
    Ok(CollectionNode {
        element: CollectionElement::Object(Box::new(element)),
    })
}

fn parse_leaf(
    map: &Map<String, Value>,
    path: &SchemaPath,
) -> Result<LeafAttribute, PlotlySchemaGenError> {
    let value_type: ValueType = parse_value_type(map, path)?;

    let array_ok: bool = match map.get("arrayOk") {
        None => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            return Err(PlotlySchemaGenError::parse(
                path.child("arrayOk").as_str(),
                "arrayOk must be a boolean",
            ));
        }
    };

    let default: Option<Value> = map.get("dflt").cloned();
    let regex: Option<String> = map
        .get("regex")
        .and_then(Value::as_str)
        .map(strip_regex_delimiters);
    let declared_required: bool = map
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    // A subplot reference with a concrete default always goes on the wire.
    let required: bool = declared_required
        || (value_type == ValueType::SubplotId && default.as_ref().is_some_and(Value::is_string));

    Ok(LeafAttribute {
        value_type,
        array_ok,
        required,
        default,
        regex,
    })
}

/// Plotly serializes JavaScript regex literals as `/pattern/`.
pub(crate) fn strip_regex_delimiters(raw: &str) -> String {
    raw.strip_prefix('/')
        .and_then(|rest| rest.strip_suffix('/'))
        .unwrap_or(raw)
        .to_string()
}

pub(crate) fn value_type_tag(map: &Map<String, Value>) -> Option<&Value> {
    map.get("valType").or_else(|| map.get("type"))
}

fn parse_value_type(
    map: &Map<String, Value>,
    path: &SchemaPath,
) -> Result<ValueType, PlotlySchemaGenError> {
    let tag: &str = match value_type_tag(map) {
        Some(Value::String(tag)) => tag,
        _ => {
            return Err(PlotlySchemaGenError::parse(
                path.child("valType").as_str(),
                "valType must be a string",
            ));
        }
    };

    let value_type: ValueType = match tag {
        "boolean" => ValueType::Boolean,
        "number" => ValueType::Number,
        "integer" => ValueType::Integer,
        "string" => ValueType::String,
        "color" => ValueType::Color,
        "colorlist" => ValueType::ColorList,
        "colorscale" => ValueType::ColorScale,
        "angle" => ValueType::Angle,
        "any" => ValueType::Any,
        "data_array" => ValueType::DataArray,
        "subplotid" => ValueType::SubplotId,
        "info_array" => ValueType::InfoArray {
            item: parse_info_array_item(map.get("items"), &path.child("items"))?,
        },
        "enumerated" => {
            ValueType::Enumerated(parse_enum_values(map.get("values"), &path.child("values"))?)
        }
        "flaglist" => parse_flag_list(map, path)?,
        other => {
            return Err(PlotlySchemaGenError::parse(
                path.child("valType").as_str(),
                format!("unrecognized valType `{other}`"),
            ));
        }
    };
    Ok(value_type)
}

fn parse_info_array_item(
    items: Option<&Value>,
    path: &SchemaPath,
) -> Result<Option<Box<ValueType>>, PlotlySchemaGenError> {
    let item_types: Vec<ValueType> = match items {
        None => return Ok(None),
        Some(Value::Object(item)) => vec![parse_value_type(item, path)?],
        Some(Value::Array(items)) => {
            let mut types: Vec<ValueType> = Vec::with_capacity(items.len());
            for (index, item) in items.iter().enumerate() {
                let item_path: SchemaPath = path.child(&index.to_string());
                types.push(parse_value_type(expect_object(item, &item_path)?, &item_path)?);
            }
            types
        }
        Some(_) => {
            return Err(PlotlySchemaGenError::parse(
                path.as_str(),
                "info_array `items` must be a declaration or a list of declarations",
            ));
        }
    };

    let Some(first) = item_types.first() else {
        return Ok(None);
    };
    if item_types.iter().all(|item| item == first) {
        Ok(Some(Box::new(first.clone())))
    } else {
        Ok(None)
    }
}

fn parse_enum_values(
    values: Option<&Value>,
    path: &SchemaPath,
) -> Result<Vec<EnumValue>, PlotlySchemaGenError> {
    let Some(Value::Array(raw_values)) = values else {
        return Err(PlotlySchemaGenError::parse(
            path.as_str(),
            "enumerated attribute needs a `values` list",
        ));
    };
    if raw_values.is_empty() {
        return Err(PlotlySchemaGenError::parse(
            path.as_str(),
            "enumerated attribute needs at least one value",
        ));
    }

    let mut parsed: Vec<EnumValue> = Vec::with_capacity(raw_values.len());
    for (index, raw) in raw_values.iter().enumerate() {
        let Some(value) = EnumValue::from_json(raw) else {
            return Err(PlotlySchemaGenError::parse(
                path.child(&index.to_string()).as_str(),
                "enumerated values must be strings, booleans or numbers",
            ));
        };
        // First occurrence wins; order is the emitted case order.
        if !parsed.contains(&value) {
            parsed.push(value);
        }
    }
    Ok(parsed)
}

fn parse_flag_list(
    map: &Map<String, Value>,
    path: &SchemaPath,
) -> Result<ValueType, PlotlySchemaGenError> {
    let flags: Vec<String> = match map.get("flags") {
        Some(flags) => string_list(flags, &path.child("flags"))?,
        None => {
            return Err(PlotlySchemaGenError::parse(
                path.as_str(),
                "flaglist attribute needs a `flags` list",
            ));
        }
    };
    let extras: Vec<String> = match map.get("extras") {
        Some(extras) => string_list(extras, &path.child("extras"))?,
        None => Vec::new(),
    };
    if flags.len() + extras.len() > MAX_FLAGS {
        return Err(PlotlySchemaGenError::parse(
            path.as_str(),
            format!("flaglist declares more than {MAX_FLAGS} flags and extras"),
        ));
    }
    Ok(ValueType::FlagList { flags, extras })
}

fn string_list(value: &Value, path: &SchemaPath) -> Result<Vec<String>, PlotlySchemaGenError> {
    let Value::Array(items) = value else {
        return Err(PlotlySchemaGenError::parse(
            path.as_str(),
            "expected a list of strings",
        ));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str().map(String::from).ok_or_else(|| {
                PlotlySchemaGenError::parse(
                    path.child(&index.to_string()).as_str(),
                    "expected a string",
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_tree(json: &serde_json::Value) -> SchemaNode {
        parse_document(json, "Root").expect("schema should parse")
    }

    fn parse_error(json: &serde_json::Value) -> (String, String) {
        match parse_document(json, "Root") {
            Err(PlotlySchemaGenError::SchemaParseError { path, message }) => (path, message),
            other => panic!("expected SchemaParseError, got {other:?}"),
        }
    }

    #[test]
    fn bare_tree_root_takes_root_name() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "r": { "valType": "number", "arrayOk": true }
        }));
        assert_eq!("Root", root.name);
        assert!(!root.is_plot_document());
        let NodeKind::Leaf(leaf) = &root.children()[0].kind else {
            panic!("r should be a leaf");
        };
        assert_eq!(ValueType::Number, leaf.value_type);
        assert!(leaf.array_ok);
        assert!(!leaf.required);
    }

    #[test]
    fn type_alias_is_accepted_for_leaves() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "r": { "arrayOk": true, "type": "number" }
        }));
        let NodeKind::Leaf(leaf) = &root.children()[0].kind else {
            panic!("r should be a leaf");
        };
        assert_eq!(ValueType::Number, leaf.value_type);
    }

    #[test]
    fn children_keep_document_order() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "zeta": { "valType": "string" },
            "alpha": { "valType": "string" },
            "mid": { "valType": "string" }
        }));
        let names: Vec<&str> = root.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec!["zeta", "alpha", "mid"], names);
    }

    #[test]
    fn enum_values_keep_declaration_order_and_dedupe() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "visible": { "valType": "enumerated", "values": [true, false, "legendonly", true] }
        }));
        let NodeKind::Leaf(leaf) = &root.children()[0].kind else {
            panic!("visible should be a leaf");
        };
        let expected: ValueType = ValueType::Enumerated(vec![
            EnumValue::Bool(true),
            EnumValue::Bool(false),
            EnumValue::String("legendonly".to_string()),
        ]);
        assert_eq!(expected, leaf.value_type);
    }

    #[test]
    fn nested_objects_and_metadata_keys() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "marker": {
                "role": "object",
                "editType": "calc",
                "description": "  Marker settings. ",
                "size": { "valType": "number" }
            }
        }));
        let marker: &SchemaNode = &root.children()[0];
        assert_eq!(Some("Marker settings."), marker.description.as_deref());
        assert_eq!(1, marker.children().len());
        assert_eq!("size", marker.children()[0].name);
    }

    #[test]
    fn deprecated_children_are_flagged() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "_deprecated": { "titlefont": { "valType": "string" } },
            "title": { "valType": "string" }
        }));
        let flags: Vec<(&str, bool)> = root
            .children()
            .iter()
            .map(|c| (c.name.as_str(), c.deprecated))
            .collect();
        assert_eq!(vec![("titlefont", true), ("title", false)], flags);
    }

    #[test]
    fn collection_with_object_element() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "annotations": {
                "items": { "annotation": { "text": { "valType": "string" } } },
                "role": "object"
            }
        }));
        let NodeKind::Collection(collection) = &root.children()[0].kind else {
            panic!("annotations should be a collection");
        };
        let CollectionElement::Object(element) = &collection.element else {
            panic!("element should be an object");
        };
        assert_eq!("annotation", element.name);
    }

    #[test]
    fn collection_without_attributes_is_opaque() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "transforms": {
                "items": { "transform": { "editType": "calc", "description": "An operation." } },
                "role": "object"
            }
        }));
        let NodeKind::Collection(collection) = &root.children()[0].kind else {
            panic!("transforms should be a collection");
        };
        assert_eq!(
            CollectionElement::Opaque {
                name: "transform".to_string()
            },
            collection.element
        );
    }

    #[test]
    fn subplot_id_with_default_is_required() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "xaxis": { "valType": "subplotid", "dflt": "x", "regex": "/^x([2-9]|[1-9][0-9]+)?$/" }
        }));
        let NodeKind::Leaf(leaf) = &root.children()[0].kind else {
            panic!("xaxis should be a leaf");
        };
        assert!(leaf.required);
        assert_eq!(Some("^x([2-9]|[1-9][0-9]+)?$"), leaf.regex.as_deref());
    }

    #[test]
    fn subplot_id_with_null_or_missing_default_is_optional() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "coloraxis": { "valType": "subplotid", "dflt": null, "regex": "/^coloraxis([2-9]|[1-9][0-9]+)?$/" },
            "legend": { "valType": "subplotid", "regex": "/^legend([2-9]|[1-9][0-9]+)?$/" }
        }));
        for child in root.children() {
            let NodeKind::Leaf(leaf) = &child.kind else {
                panic!("{} should be a leaf", child.name);
            };
            assert!(!leaf.required, "{} should be optional", child.name);
        }
    }

    #[test]
    fn info_array_with_uniform_items_records_item_type() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "range": { "valType": "info_array", "items": [{ "valType": "number" }, { "valType": "number" }] },
            "mixed": { "valType": "info_array", "items": [{ "valType": "number" }, { "valType": "string" }] }
        }));
        let kinds: Vec<&NodeKind> = root.children().iter().map(|c| &c.kind).collect();
        let NodeKind::Leaf(range) = kinds[0] else { panic!("leaf") };
        let NodeKind::Leaf(mixed) = kinds[1] else { panic!("leaf") };
        assert_eq!(
            ValueType::InfoArray {
                item: Some(Box::new(ValueType::Number))
            },
            range.value_type
        );
        assert_eq!(ValueType::InfoArray { item: None }, mixed.value_type);
    }

    #[test]
    fn unrecognized_val_type_fails() {
        let (path, message) = parse_error(&serde_json::json!({
            "marker": { "size": { "valType": "bogus" } }
        }));
        assert_eq!("/marker/size/valType", path);
        assert!(message.contains("bogus"), "got: {message}");
    }

    #[test]
    fn empty_object_fails() {
        let (path, message) = parse_error(&serde_json::json!({
            "marker": { "role": "object" }
        }));
        assert_eq!("/marker", path);
        assert_eq!("object declares no attributes", message);
    }

    #[test]
    fn non_object_attribute_fails() {
        let (path, _) = parse_error(&serde_json::json!({ "size": 3 }));
        assert_eq!("/size", path);
    }

    #[test]
    fn root_must_be_object() {
        let (path, message) = parse_error(&serde_json::json!([1, 2]));
        assert_eq!("", path);
        assert_eq!("schema root must be an object", message);
    }

    #[test]
    fn enumerated_without_values_fails() {
        let (path, _) = parse_error(&serde_json::json!({
            "side": { "valType": "enumerated" }
        }));
        assert_eq!("/side/values", path);
    }

    #[test]
    fn enumerated_with_object_value_fails() {
        let (path, _) = parse_error(&serde_json::json!({
            "side": { "valType": "enumerated", "values": ["left", {}] }
        }));
        assert_eq!("/side/values/1", path);
    }

    #[test]
    fn collection_items_must_be_single() {
        let (path, _) = parse_error(&serde_json::json!({
            "shapes": { "items": { "a": { "x": { "valType": "number" } }, "b": { "x": { "valType": "number" } } } }
        }));
        assert_eq!("/shapes/items", path);
    }

    #[test]
    fn plot_document_roles_and_find() {
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "traces": {
                "scatter": {
                    "type": "scatter",
                    "animatable": true,
                    "attributes": { "type": "scatter", "x": { "valType": "data_array" } },
                    "meta": { "description": "Scatter trace." }
                }
            },
            "layout": { "layoutAttributes": { "title": { "valType": "string" } } },
            "transforms": {
                "filter": { "attributes": { "enabled": { "valType": "boolean" } } }
            },
            "frames": {
                "items": { "frames_entry": { "data": { "valType": "any" }, "role": "object" } },
                "role": "object"
            },
            "config": { "ignored": true }
        }));
        assert!(root.is_plot_document());
        let names: Vec<&str> = root.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec!["scatter", "layout", "filter", "frames"], names);
        assert_eq!(
            Some(&ObjectRole::Trace {
                type_tag: "scatter".to_string(),
                animatable: true
            }),
            root.children()[0].role()
        );
        assert_eq!(
            Some("Scatter trace."),
            root.children()[0].description.as_deref()
        );
        assert!(root.find(&["frames", "data"]).is_some());
        assert!(root.find(&["frames", "missing"]).is_none());
    }

    #[test]
    fn trace_without_attributes_fails() {
        let (path, _) = parse_error(&serde_json::json!({
            "traces": { "scatter": { "type": "scatter" } }
        }));
        assert_eq!("/traces/scatter", path);
    }

    #[test]
    fn trace_layout_attributes_join_the_layout() {
        let bar_mode: serde_json::Value = serde_json::json!({
            "valType": "enumerated",
            "values": ["stack", "group", "overlay", "relative"],
            "dflt": "group"
        });
        let root: SchemaNode = parse_tree(&serde_json::json!({
            "traces": {
                "bar": {
                    "attributes": { "x": { "valType": "data_array" } },
                    "layoutAttributes": { "barmode": bar_mode, "bargap": { "valType": "number", "min": 0, "max": 1 } }
                },
                "histogram": {
                    "attributes": { "x": { "valType": "data_array" } },
                    "layoutAttributes": { "barmode": bar_mode }
                }
            },
            "layout": { "layoutAttributes": { "title": { "valType": "string" } } }
        }));
        let layout: &SchemaNode = root.find(&["layout"]).expect("layout");
        let names: Vec<&str> = layout.children().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(vec!["title", "barmode", "bargap"], names);
    }

    #[test]
    fn conflicting_trace_layout_attributes_fail() {
        let (path, message) = parse_error(&serde_json::json!({
            "traces": {
                "bar": {
                    "attributes": { "x": { "valType": "data_array" } },
                    "layoutAttributes": { "barmode": { "valType": "enumerated", "values": ["stack", "group"] } }
                },
                "funnel": {
                    "attributes": { "x": { "valType": "data_array" } },
                    "layoutAttributes": { "barmode": { "valType": "number" } }
                }
            }
        }));
        assert_eq!("/traces/funnel/layoutAttributes/barmode", path);
        assert!(message.contains("`barmode`"), "got: {message}");
    }
}
