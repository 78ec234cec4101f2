//! Type and field descriptors: the synthesized form of the schema that the
//! encoding stage, the workaround layer and the emitter operate on.

use crate::error::PlotlySchemaGenError;
use crate::schema::EnumValue;
use std::collections::{HashMap, HashSet};

/// What a field holds, before `Option`/`Vec` wrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Bool,
    Number,
    Integer,
    String,
    Color,
    ColorList,
    ColorScale,
    DataArray,
    Any,
    /// Axis or subplot handle encoded as a short string (`"x2"`).
    SubplotRef {
        base: String,
        pattern: Option<String>,
    },
    /// A generated struct, enumeration or flag list.
    Named(String),
    /// Numbered objects of one generated struct (`xaxis`, `xaxis2`, ...).
    Subplots(String),
    /// Any concrete member of a family, encoded by delegation.
    Polymorphic(Family),
    /// Scalar-or-sequence wrapper for `arrayOk` attributes.
    Data(Box<FieldType>),
}

impl FieldType {
    /// The generated type this field refers to, looking through `Data`.
    #[must_use]
    pub fn named(&self) -> Option<&str> {
        match self {
            Self::Named(name) | Self::Subplots(name) => Some(name),
            Self::Data(inner) => inner.named(),
            _ => None,
        }
    }

    fn named_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Named(name) | Self::Subplots(name) => Some(name),
            Self::Data(inner) => inner.named_mut(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            Self::Number => true,
            Self::Data(inner) => inner.is_numeric(),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Trace,
    Transform,
}

/// Value a required field starts with.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultExpr {
    /// `Default::default()` of the field type.
    TypeDefault,
    EmptyVec,
    Bool(bool),
    Number(f64),
    Integer(i64),
    Str(String),
    EnumCase { type_name: String, case: String },
    Subplot(u32),
}

/// How a field with a custom encoding is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeStrategy {
    /// Write the referenced subplot's identity string built on `base`.
    SubplotReference { base: String },
    /// Call the value's own encode routine.
    Delegate,
    /// Nested sequence, each element through its own encode routine.
    DelegateSequence,
    /// One entry per numbered object, keyed `base`, `base2`, ...
    SubplotObjects { base: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEncoding {
    pub wire_key: String,
    /// Element type the encoding delegates to, when it is a single known type.
    pub element: Option<String>,
    pub strategy: EncodeStrategy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub field_name: String,
    /// Attribute name in the schema.
    pub schema_name: String,
    /// Key written on the wire; assigned by the encoding stage.
    pub wire_key: Option<String>,
    pub ty: FieldType,
    pub optional: bool,
    pub is_array: bool,
    /// Required fields only.
    pub default_expression: Option<DefaultExpr>,
    pub custom_encoding: Option<CustomEncoding>,
    pub description: Option<String>,
    pub deprecated: bool,
}

impl FieldDescriptor {
    /// The key this field encodes under.
    #[must_use]
    pub fn wire_key(&self) -> &str {
        self.custom_encoding
            .as_ref()
            .map(|encoding| encoding.wire_key.as_str())
            .or(self.wire_key.as_deref())
            .unwrap_or(&self.schema_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructRole {
    Plain,
    Trace { type_tag: String, animatable: bool },
    Transform { type_tag: String },
}

/// What one enumeration case writes on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum CaseValue {
    Literal(EnumValue),
    /// Any subplot built on `base` (`"x"`, `"x2"`); with `domain`, that
    /// subplot's domain (`"x2 domain"`).
    Subplot { base: String, domain: bool },
    /// Any number.
    Number,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumCase {
    pub name: String,
    pub value: CaseValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagCase {
    /// Constant name (`LEGEND_ONLY`).
    pub name: String,
    pub wire: String,
    /// Plotly's exclusive values (`all`, `none`, `skip`).
    pub extra: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeShape {
    Struct {
        role: StructRole,
        fields: Vec<FieldDescriptor>,
    },
    Enum(Vec<EnumCase>),
    Flags(Vec<FlagCase>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    pub type_name: String,
    /// Where the node that produced this type lives in the input document.
    pub schema_path: String,
    pub description: Option<String>,
    /// Type whose declaration this one is emitted after; `None` for top-level types.
    pub owner: Option<String>,
    pub shape: TypeShape,
}

impl TypeDescriptor {
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        match &self.shape {
            TypeShape::Struct { fields, .. } => fields,
            _ => &[],
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut Vec<FieldDescriptor>> {
        match &mut self.shape {
            TypeShape::Struct { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Field by schema (wire) name.
    #[must_use]
    pub fn field(&self, schema_name: &str) -> Option<&FieldDescriptor> {
        self.fields().iter().find(|f| f.schema_name == schema_name)
    }
}

/// All descriptors of one generation run, keyed by type name, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    types: Vec<TypeDescriptor>,
    index: HashMap<String, usize>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns `NamingCollisionError` if a type with the same name exists.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Result<(), PlotlySchemaGenError> {
        if let Some(&existing) = self.index.get(&descriptor.type_name) {
            return Err(PlotlySchemaGenError::NamingCollisionError {
                name: descriptor.type_name,
                first_path: self.types[existing].schema_path.clone(),
                second_path: descriptor.schema_path,
            });
        }
        self.index
            .insert(descriptor.type_name.clone(), self.types.len());
        self.types.push(descriptor);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.index.get(type_name).map(|&i| &self.types[i])
    }

    pub fn get_mut(&mut self, type_name: &str) -> Option<&mut TypeDescriptor> {
        self.index.get(type_name).map(|&i| &mut self.types[i])
    }

    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.index.contains_key(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TypeDescriptor> {
        self.types.iter_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Removes the named types and points every field that referenced one of
    /// them at `replacement`.
    pub(crate) fn replace_types(&mut self, removed: &HashSet<String>, replacement: &str) {
        self.types.retain(|t| !removed.contains(&t.type_name));
        for descriptor in &mut self.types {
            if let Some(fields) = descriptor.fields_mut() {
                for field in fields {
                    if let Some(name) = field.ty.named_mut()
                        && removed.contains(name.as_str())
                    {
                        *name = replacement.to_string();
                    }
                    if let Some(DefaultExpr::EnumCase { type_name, .. }) =
                        &mut field.default_expression
                        && removed.contains(type_name.as_str())
                    {
                        *type_name = replacement.to_string();
                    }
                }
            }
        }
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .types
            .iter()
            .enumerate()
            .map(|(i, t)| (t.type_name.clone(), i))
            .collect();
    }

    /// Types in emission order: each top-level type followed by the types it
    /// owns, depth-first.
    #[must_use]
    pub fn emission_order(&self) -> Vec<&TypeDescriptor> {
        let mut owned: HashMap<&str, Vec<&TypeDescriptor>> = HashMap::new();
        let mut roots: Vec<&TypeDescriptor> = Vec::new();
        for descriptor in &self.types {
            match descriptor.owner.as_deref() {
                Some(owner) if self.contains(owner) => {
                    owned.entry(owner).or_default().push(descriptor);
                }
                _ => roots.push(descriptor),
            }
        }

        let mut order: Vec<&TypeDescriptor> = Vec::with_capacity(self.types.len());
        let mut stack: Vec<&TypeDescriptor> = roots.into_iter().rev().collect();
        while let Some(descriptor) = stack.pop() {
            order.push(descriptor);
            if let Some(children) = owned.get(descriptor.type_name.as_str()) {
                stack.extend(children.iter().rev());
            }
        }
        order
    }

    /// True when a value of this type can derive `Clone` and `PartialEq`,
    /// i.e. nothing reachable from it holds a polymorphic trait object.
    #[must_use]
    pub fn is_value_type(&self, type_name: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        self.is_value_type_inner(type_name, &mut visited)
    }

    fn is_value_type_inner<'a>(&'a self, type_name: &'a str, visited: &mut HashSet<&'a str>) -> bool {
        if !visited.insert(type_name) {
            return true;
        }
        let Some(descriptor) = self.get(type_name) else {
            return true;
        };
        descriptor.fields().iter().all(|field| match &field.ty {
            FieldType::Polymorphic(_) => false,
            other => other
                .named()
                .is_none_or(|name| self.is_value_type_inner(name, visited)),
        })
    }
}
