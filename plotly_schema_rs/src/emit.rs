//! Rust Emitter: renders the final descriptor registry as Rust source.
//!
//! Everything outside the generated types is referenced by absolute path
//! (`::core::option::Option`, `{runtime}::Data`, ...) so the output compiles in
//! any module, whatever the surrounding imports, and cannot be shadowed by a
//! generated type such as `Box`.

use crate::descriptor::{
    CaseValue, DefaultExpr, EncodeStrategy, EnumCase, Family, FieldDescriptor, FieldType, FlagCase,
    Registry, StructRole, TypeDescriptor, TypeShape,
};
use crate::naming;
use crate::schema::EnumValue;
use crate::settings::GenerateSettings;
use std::io::Write;

const OPTION: &str = "::core::option::Option";
const VEC: &str = "::std::vec::Vec";
const STRING: &str = "::std::string::String";
const BOX: &str = "::std::boxed::Box";
const DEFAULT: &str = "::core::default::Default";
const INTO: &str = "::core::convert::Into";
const RESULT: &str = "::core::result::Result";

/// First line of every generated file.
pub const HEADER: &str = "// Generated by plotly-schema-rs. Do not edit manually.";

/// Write every type in `registry` to `writer`, each top-level type followed by
/// the types it owns.
///
/// # Errors
///
/// Returns any error from `writer`.
pub fn emit<W: Write>(
    registry: &Registry,
    settings: &GenerateSettings,
    writer: &mut W,
) -> std::io::Result<()> {
    let emitter: Emitter = Emitter {
        registry,
        rt: settings.runtime_path.trim_end_matches("::"),
        convenience_fields: &settings.convenience_fields,
    };

    writeln!(writer, "{HEADER}")?;
    for descriptor in registry.emission_order() {
        writeln!(writer)?;
        match &descriptor.shape {
            TypeShape::Struct { role, fields } => {
                emitter.emit_struct(descriptor, role, fields, writer)?;
            }
            TypeShape::Enum(cases) => emitter.emit_enum(descriptor, cases, writer)?,
            TypeShape::Flags(flags) => emitter.emit_flags(descriptor, flags, writer)?,
        }
    }
    Ok(())
}

/// Emit a doc comment from a description: each line becomes a `///` line.
/// `line_prefix` is prepended to each line (e.g. `""` for types, `"    "` for fields).
fn emit_doc_comment<W: Write>(
    writer: &mut W,
    description: Option<&str>,
    line_prefix: &str,
) -> std::io::Result<()> {
    let Some(desc) = description else {
        return Ok(());
    };
    let trimmed: &str = desc.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    for line in trimmed.lines() {
        let line: &str = line.trim_end();
        if line.is_empty() {
            writeln!(writer, "{line_prefix}///")?;
        } else {
            writeln!(writer, "{line_prefix}/// {line}")?;
        }
    }
    Ok(())
}

/// Where an encoded value is read from inside `serialize`.
#[derive(Clone, Copy)]
enum Source<'a> {
    /// `if let Some(value) = &self.field` binding; already a reference.
    Binding,
    /// `self.<field>` of a required field.
    Field(&'a str),
}

struct Emitter<'a> {
    registry: &'a Registry,
    rt: &'a str,
    convenience_fields: &'a [String],
}

impl Emitter<'_> {
    fn base_type(&self, ty: &FieldType) -> String {
        let rt: &str = self.rt;
        match ty {
            FieldType::Bool => "bool".to_string(),
            FieldType::Number => "f64".to_string(),
            FieldType::Integer => "i64".to_string(),
            FieldType::String | FieldType::Color => STRING.to_string(),
            FieldType::ColorList => format!("{VEC}<{STRING}>"),
            FieldType::ColorScale => format!("{rt}::ColorScale"),
            FieldType::DataArray => format!("{rt}::DataArray"),
            FieldType::Any => format!("{rt}::Anything"),
            FieldType::SubplotRef { .. } => format!("{rt}::SubplotId"),
            FieldType::Named(name) => name.clone(),
            FieldType::Subplots(name) => format!("{rt}::Subplots<{name}>"),
            FieldType::Polymorphic(Family::Trace) => format!("{BOX}<dyn {rt}::Trace>"),
            FieldType::Polymorphic(Family::Transform) => format!("{BOX}<dyn {rt}::Transform>"),
            FieldType::Data(inner) => format!("{rt}::Data<{}>", self.base_type(inner)),
        }
    }

    fn value_type(&self, field: &FieldDescriptor) -> String {
        let base: String = self.base_type(&field.ty);
        if field.is_array {
            format!("{VEC}<{base}>")
        } else {
            base
        }
    }

    fn field_type(&self, field: &FieldDescriptor) -> String {
        let value: String = self.value_type(field);
        if field.optional {
            format!("{OPTION}<{value}>")
        } else {
            value
        }
    }

    fn default_value(&self, field: &FieldDescriptor) -> String {
        let rt: &str = self.rt;
        if field.optional {
            return format!("{OPTION}::None");
        }
        let scalar: String = match field
            .default_expression
            .as_ref()
            .unwrap_or(&DefaultExpr::TypeDefault)
        {
            DefaultExpr::TypeDefault => return format!("{DEFAULT}::default()"),
            DefaultExpr::EmptyVec => return format!("{VEC}::new()"),
            DefaultExpr::Subplot(index) => return format!("{rt}::SubplotId::new({index})"),
            DefaultExpr::Bool(b) => b.to_string(),
            DefaultExpr::Number(n) => format!("{n:?}"),
            DefaultExpr::Integer(i) => i.to_string(),
            DefaultExpr::Str(s) => format!("{STRING}::from({s:?})"),
            DefaultExpr::EnumCase { type_name, case } => format!("{type_name}::{case}"),
        };
        if matches!(field.ty, FieldType::Data(_)) {
            format!("{rt}::Data::Constant({scalar})")
        } else {
            scalar
        }
    }

    /// Parameter type and stored expression for a setter or constructor argument.
    fn parameter(&self, field: &FieldDescriptor, ident: &str) -> (String, String) {
        let rt: &str = self.rt;
        let (param, stored): (String, String) = match &field.ty {
            FieldType::Polymorphic(family) if !field.is_array => {
                let capability: &str = match family {
                    Family::Trace => "Trace",
                    Family::Transform => "Transform",
                };
                (
                    format!("impl {rt}::{capability} + 'static"),
                    format!("{BOX}::new({ident})"),
                )
            }
            FieldType::Subplots(name) => (format!("impl {INTO}<{name}>"), format!("{ident}.into()")),
            _ => (
                format!("impl {INTO}<{}>", self.value_type(field)),
                format!("{ident}.into()"),
            ),
        };
        if field.optional {
            (param, format!("{OPTION}::Some({stored})"))
        } else {
            (param, stored)
        }
    }

    fn encoded_value(&self, field: &FieldDescriptor, source: Source<'_>) -> String {
        let rt: &str = self.rt;
        let strategy: Option<&EncodeStrategy> =
            field.custom_encoding.as_ref().map(|encoding| &encoding.strategy);
        match (strategy, source) {
            (Some(EncodeStrategy::SubplotReference { base }), Source::Binding) => {
                format!("&value.to_wire({base:?})")
            }
            (Some(EncodeStrategy::SubplotReference { base }), Source::Field(name)) => {
                format!("&self.{name}.to_wire({base:?})")
            }
            (Some(EncodeStrategy::Delegate), Source::Binding) => {
                format!("&{rt}::Delegated(&**value)")
            }
            (Some(EncodeStrategy::Delegate), Source::Field(name)) => {
                format!("&{rt}::Delegated(&*self.{name})")
            }
            (Some(EncodeStrategy::DelegateSequence), Source::Binding) => {
                format!("&{rt}::DelegatedSeq(value.as_slice())")
            }
            (Some(EncodeStrategy::DelegateSequence), Source::Field(name)) => {
                format!("&{rt}::DelegatedSeq(self.{name}.as_slice())")
            }
            (None, Source::Binding) if field.ty.is_numeric() => format!("&{rt}::Numeric(value)"),
            (None, Source::Field(name)) if field.ty.is_numeric() => {
                format!("&{rt}::Numeric(&self.{name})")
            }
            (Some(EncodeStrategy::SubplotObjects { .. }) | None, Source::Binding) => {
                "value".to_string()
            }
            (Some(EncodeStrategy::SubplotObjects { .. }) | None, Source::Field(name)) => {
                format!("&self.{name}")
            }
        }
    }

    fn setter_name(field: &FieldDescriptor) -> String {
        let bare: &str = naming::bare_identifier(&field.field_name);
        if matches!(bare, "new" | "default") {
            format!("set_{bare}")
        } else {
            field.field_name.clone()
        }
    }

    fn convenience<'f>(&self, fields: &'f [FieldDescriptor]) -> Vec<&'f FieldDescriptor> {
        fields
            .iter()
            .filter(|field| {
                !field.deprecated
                    && !matches!(field.ty, FieldType::Polymorphic(_) | FieldType::Subplots(_))
                    && self
                        .convenience_fields
                        .iter()
                        .any(|key| key == field.wire_key())
            })
            .collect()
    }

    fn emit_struct<W: Write>(
        &self,
        descriptor: &TypeDescriptor,
        role: &StructRole,
        fields: &[FieldDescriptor],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let name: &str = &descriptor.type_name;
        let rt: &str = self.rt;

        emit_doc_comment(writer, descriptor.description.as_deref(), "")?;
        if self.registry.is_value_type(name) {
            writeln!(writer, "#[derive(Debug, Clone, PartialEq)]")?;
        } else {
            writeln!(writer, "#[derive(Debug)]")?;
        }
        writeln!(writer, "pub struct {name} {{")?;
        for field in fields {
            emit_doc_comment(writer, field.description.as_deref(), "    ")?;
            if field.deprecated {
                if field.description.is_some() {
                    writeln!(writer, "    ///")?;
                }
                writeln!(writer, "    /// Deprecated.")?;
            }
            writeln!(
                writer,
                "    pub {}: {},",
                field.field_name,
                self.field_type(field)
            )?;
        }
        writeln!(writer, "}}")?;
        writeln!(writer)?;

        writeln!(writer, "impl {DEFAULT} for {name} {{")?;
        writeln!(writer, "    fn default() -> Self {{")?;
        writeln!(writer, "        Self {{")?;
        for field in fields {
            writeln!(
                writer,
                "            {}: {},",
                field.field_name,
                self.default_value(field)
            )?;
        }
        writeln!(writer, "        }}")?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;

        writeln!(writer, "impl {name} {{")?;
        let common: Vec<&FieldDescriptor> = self.convenience(fields);
        writeln!(writer, "    #[must_use]")?;
        if common.is_empty() {
            writeln!(writer, "    pub fn new() -> Self {{")?;
            writeln!(writer, "        <Self as {DEFAULT}>::default()")?;
            writeln!(writer, "    }}")?;
        } else {
            let params: Vec<String> = common
                .iter()
                .map(|field| {
                    let (param, _) = self.parameter(field, &field.field_name);
                    format!("{}: {param}", field.field_name)
                })
                .collect();
            writeln!(writer, "    pub fn new({}) -> Self {{", params.join(", "))?;
            writeln!(writer, "        Self {{")?;
            for field in &common {
                let (_, stored) = self.parameter(field, &field.field_name);
                writeln!(writer, "            {}: {stored},", field.field_name)?;
            }
            if common.len() < fields.len() {
                writeln!(writer, "            ..<Self as {DEFAULT}>::default()")?;
            }
            writeln!(writer, "        }}")?;
            writeln!(writer, "    }}")?;
        }
        for field in fields {
            let (param, stored) = self.parameter(field, "value");
            let setter: String = Self::setter_name(field);
            writeln!(writer)?;
            writeln!(writer, "    #[must_use]")?;
            writeln!(writer, "    pub fn {setter}(mut self, value: {param}) -> Self {{")?;
            if matches!(field.ty, FieldType::Subplots(_)) {
                writeln!(
                    writer,
                    "        self.{}.insert({rt}::SubplotId::new(1), {stored});",
                    field.field_name
                )?;
                writeln!(writer, "        self")?;
                writeln!(writer, "    }}")?;
                writeln!(writer)?;
                writeln!(writer, "    #[must_use]")?;
                writeln!(
                    writer,
                    "    pub fn {}_at(mut self, id: impl {INTO}<{rt}::SubplotId>, value: {param}) -> Self {{",
                    naming::bare_identifier(&setter)
                )?;
                writeln!(writer, "        self.{}.insert(id.into(), {stored});", field.field_name)?;
            } else {
                writeln!(writer, "        self.{} = {stored};", field.field_name)?;
            }
            writeln!(writer, "        self")?;
            writeln!(writer, "    }}")?;
        }
        writeln!(writer, "}}")?;
        writeln!(writer)?;

        self.emit_struct_serialize(name, role, fields, writer)?;

        match role {
            StructRole::Plain => {}
            StructRole::Trace {
                type_tag,
                animatable,
            } => {
                writeln!(writer)?;
                self.emit_encode(name, writer)?;
                writeln!(writer)?;
                writeln!(writer, "impl {rt}::Trace for {name} {{")?;
                writeln!(writer, "    fn trace_type(&self) -> &'static str {{")?;
                writeln!(writer, "        {type_tag:?}")?;
                writeln!(writer, "    }}")?;
                writeln!(writer)?;
                writeln!(writer, "    fn animatable(&self) -> bool {{")?;
                writeln!(writer, "        {animatable}")?;
                writeln!(writer, "    }}")?;
                writeln!(writer, "}}")?;
            }
            StructRole::Transform { type_tag } => {
                writeln!(writer)?;
                self.emit_encode(name, writer)?;
                writeln!(writer)?;
                writeln!(writer, "impl {rt}::Transform for {name} {{")?;
                writeln!(writer, "    fn transform_type(&self) -> &'static str {{")?;
                writeln!(writer, "        {type_tag:?}")?;
                writeln!(writer, "    }}")?;
                writeln!(writer, "}}")?;
            }
        }
        Ok(())
    }

    fn emit_struct_serialize<W: Write>(
        &self,
        name: &str,
        role: &StructRole,
        fields: &[FieldDescriptor],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let rt: &str = self.rt;
        writeln!(writer, "impl {rt}::serde::Serialize for {name} {{")?;
        writeln!(
            writer,
            "    fn serialize<S>(&self, serializer: S) -> {RESULT}<S::Ok, S::Error>"
        )?;
        writeln!(writer, "    where")?;
        writeln!(writer, "        S: {rt}::serde::Serializer,")?;
        writeln!(writer, "    {{")?;
        writeln!(writer, "        use {rt}::serde::ser::SerializeMap as _;")?;
        writeln!(
            writer,
            "        let mut map = serializer.serialize_map({OPTION}::None)?;"
        )?;
        match role {
            StructRole::Plain => {}
            StructRole::Trace { type_tag, .. } | StructRole::Transform { type_tag } => {
                writeln!(writer, "        map.serialize_entry(\"type\", {type_tag:?})?;")?;
            }
        }
        for field in fields {
            let key: &str = field.wire_key();
            if let Some(EncodeStrategy::SubplotObjects { base }) =
                field.custom_encoding.as_ref().map(|encoding| &encoding.strategy)
            {
                writeln!(
                    writer,
                    "        for (id, value) in self.{}.iter() {{",
                    field.field_name
                )?;
                writeln!(
                    writer,
                    "            map.serialize_entry(&id.to_wire({base:?}), {})?;",
                    self.encoded_value(field, Source::Binding)
                )?;
                writeln!(writer, "        }}")?;
            } else if field.optional {
                writeln!(
                    writer,
                    "        if let {OPTION}::Some(value) = &self.{} {{",
                    field.field_name
                )?;
                writeln!(
                    writer,
                    "            map.serialize_entry({key:?}, {})?;",
                    self.encoded_value(field, Source::Binding)
                )?;
                writeln!(writer, "        }}")?;
            } else {
                writeln!(
                    writer,
                    "        map.serialize_entry({key:?}, {})?;",
                    self.encoded_value(field, Source::Field(&field.field_name))
                )?;
            }
        }
        writeln!(writer, "        map.end()")?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        Ok(())
    }

    fn emit_encode<W: Write>(&self, name: &str, writer: &mut W) -> std::io::Result<()> {
        let rt: &str = self.rt;
        writeln!(writer, "impl {rt}::Encode for {name} {{")?;
        writeln!(
            writer,
            "    fn encode_self(&self) -> {rt}::serde_json::Result<{rt}::serde_json::Value> {{"
        )?;
        writeln!(writer, "        {rt}::serde_json::to_value(self)")?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        Ok(())
    }

    fn emit_enum<W: Write>(
        &self,
        descriptor: &TypeDescriptor,
        cases: &[EnumCase],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let name: &str = &descriptor.type_name;
        let rt: &str = self.rt;

        let numeric: bool = cases.iter().any(|case| case.value == CaseValue::Number);
        emit_doc_comment(writer, descriptor.description.as_deref(), "")?;
        if numeric {
            writeln!(writer, "#[derive(Debug, Clone, Copy, PartialEq)]")?;
        } else {
            writeln!(writer, "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
        }
        writeln!(writer, "pub enum {name} {{")?;
        for case in cases {
            match &case.value {
                CaseValue::Literal(_) => writeln!(writer, "    {},", case.name)?,
                CaseValue::Subplot { .. } => writeln!(writer, "    {}({rt}::SubplotId),", case.name)?,
                CaseValue::Number => writeln!(writer, "    {}(f64),", case.name)?,
            }
        }
        writeln!(writer, "}}")?;
        writeln!(writer)?;

        if let Some(first) = cases.first() {
            let value: String = match &first.value {
                CaseValue::Literal(_) => format!("Self::{}", first.name),
                CaseValue::Subplot { .. } => format!("Self::{}({rt}::SubplotId::new(1))", first.name),
                CaseValue::Number => format!("Self::{}(0.0)", first.name),
            };
            writeln!(writer, "impl {DEFAULT} for {name} {{")?;
            writeln!(writer, "    fn default() -> Self {{")?;
            writeln!(writer, "        {value}")?;
            writeln!(writer, "    }}")?;
            writeln!(writer, "}}")?;
            writeln!(writer)?;
        }

        if let Some(number) = cases.iter().find(|case| case.value == CaseValue::Number) {
            writeln!(writer, "impl ::core::convert::From<f64> for {name} {{")?;
            writeln!(writer, "    fn from(value: f64) -> Self {{")?;
            writeln!(writer, "        Self::{}(value)", number.name)?;
            writeln!(writer, "    }}")?;
            writeln!(writer, "}}")?;
            writeln!(writer)?;
        }

        writeln!(writer, "impl {rt}::serde::Serialize for {name} {{")?;
        writeln!(
            writer,
            "    fn serialize<S>(&self, serializer: S) -> {RESULT}<S::Ok, S::Error>"
        )?;
        writeln!(writer, "    where")?;
        writeln!(writer, "        S: {rt}::serde::Serializer,")?;
        writeln!(writer, "    {{")?;
        writeln!(writer, "        match self {{")?;
        for case in cases {
            let arm: String = match &case.value {
                CaseValue::Literal(value) => {
                    format!("Self::{} => {}", case.name, serialize_literal(value))
                }
                CaseValue::Subplot { base, domain: false } => format!(
                    "Self::{}(id) => serializer.serialize_str(&id.to_wire({base:?}))",
                    case.name
                ),
                CaseValue::Subplot { base, domain: true } => format!(
                    "Self::{}(id) => serializer.serialize_str(&::std::format!(\"{{}} domain\", id.to_wire({base:?})))",
                    case.name
                ),
                CaseValue::Number => format!(
                    "Self::{}(value) => {rt}::serde::Serialize::serialize(&{rt}::Numeric(value), serializer)",
                    case.name
                ),
            };
            writeln!(writer, "            {arm},")?;
        }
        writeln!(writer, "        }}")?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;

        let unknown: String = format!(
            "{RESULT}::Err(<D::Error as {rt}::serde::de::Error>::custom(::std::format!(\"unknown {name} value: {{value}}\")))"
        );
        writeln!(writer, "impl<'de> {rt}::serde::Deserialize<'de> for {name} {{")?;
        writeln!(
            writer,
            "    fn deserialize<D>(deserializer: D) -> {RESULT}<Self, D::Error>"
        )?;
        writeln!(writer, "    where")?;
        writeln!(writer, "        D: {rt}::serde::Deserializer<'de>,")?;
        writeln!(writer, "    {{")?;
        writeln!(
            writer,
            "        let value: {rt}::serde_json::Value = {rt}::serde::Deserialize::deserialize(deserializer)?;"
        )?;
        writeln!(writer, "        match &value {{")?;
        for case in cases {
            if let CaseValue::Literal(literal) = &case.value {
                writeln!(
                    writer,
                    "            {} => {RESULT}::Ok(Self::{}),",
                    self.value_pattern(literal),
                    case.name
                )?;
            }
        }
        let subplots: Vec<&EnumCase> = cases
            .iter()
            .filter(|case| matches!(case.value, CaseValue::Subplot { .. }))
            .collect();
        if !subplots.is_empty() {
            writeln!(writer, "            {rt}::serde_json::Value::String(s) => {{")?;
            for case in subplots {
                let CaseValue::Subplot { base, domain } = &case.value else {
                    continue;
                };
                let wire: &str = if *domain {
                    "s.strip_suffix(\" domain\")"
                } else {
                    "::core::option::Option::Some(s.as_str())"
                };
                writeln!(
                    writer,
                    "                if let {OPTION}::Some(id) = {wire}.and_then(|wire| {rt}::SubplotId::from_wire({base:?}, wire)) {{"
                )?;
                writeln!(writer, "                    return {RESULT}::Ok(Self::{}(id));", case.name)?;
                writeln!(writer, "                }}")?;
            }
            writeln!(writer, "                {unknown}")?;
            writeln!(writer, "            }}")?;
        }
        if let Some(number) = cases.iter().find(|case| case.value == CaseValue::Number) {
            writeln!(
                writer,
                "            {rt}::serde_json::Value::Number(n) => {RESULT}::Ok(Self::{}(n.as_f64().unwrap_or_default())),",
                number.name
            )?;
        }
        writeln!(writer, "            _ => {unknown},")?;
        writeln!(writer, "        }}")?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        Ok(())
    }

    fn value_pattern(&self, value: &EnumValue) -> String {
        let rt: &str = self.rt;
        match value {
            EnumValue::String(s) => {
                format!("{rt}::serde_json::Value::String(s) if s.as_str() == {s:?}")
            }
            EnumValue::Bool(b) => format!("{rt}::serde_json::Value::Bool({b})"),
            EnumValue::Number(n) => match n.as_f64() {
                Some(f) => format!(
                    "{rt}::serde_json::Value::Number(n) if n.as_f64() == {OPTION}::Some({f:?})"
                ),
                None => format!("{rt}::serde_json::Value::Number(n) if n.to_string() == {:?}", n.to_string()),
            },
        }
    }

    fn emit_flags<W: Write>(
        &self,
        descriptor: &TypeDescriptor,
        flags: &[FlagCase],
        writer: &mut W,
    ) -> std::io::Result<()> {
        let name: &str = &descriptor.type_name;
        let rt: &str = self.rt;

        emit_doc_comment(writer, descriptor.description.as_deref(), "")?;
        writeln!(
            writer,
            "#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]"
        )?;
        writeln!(writer, "pub struct {name}(u64);")?;
        writeln!(writer)?;

        writeln!(writer, "impl {name} {{")?;
        for (bit, flag) in flags.iter().enumerate() {
            writeln!(writer, "    pub const {}: Self = Self(1 << {bit});", flag.name)?;
        }
        let names: Vec<String> = flags.iter().map(|flag| format!("{:?}", flag.wire)).collect();
        writeln!(
            writer,
            "    const NAMES: &'static [&'static str] = &[{}];",
            names.join(", ")
        )?;
        let extras: u64 = flags
            .iter()
            .enumerate()
            .filter(|(bit, flag)| flag.extra && *bit < 64)
            .fold(0, |mask, (bit, _)| mask | (1_u64 << bit));
        writeln!(writer, "    const EXTRAS: u64 = {extras:#x};")?;
        writeln!(writer)?;
        writeln!(writer, "    #[must_use]")?;
        writeln!(writer, "    pub const fn empty() -> Self {{")?;
        writeln!(writer, "        Self(0)")?;
        writeln!(writer, "    }}")?;
        writeln!(writer)?;
        writeln!(writer, "    #[must_use]")?;
        writeln!(writer, "    pub const fn bits(self) -> u64 {{")?;
        writeln!(writer, "        self.0")?;
        writeln!(writer, "    }}")?;
        writeln!(writer)?;
        writeln!(writer, "    #[must_use]")?;
        writeln!(writer, "    pub const fn contains(self, other: Self) -> bool {{")?;
        writeln!(writer, "        self.0 & other.0 == other.0")?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;

        writeln!(writer, "impl ::core::ops::BitOr for {name} {{")?;
        writeln!(writer, "    type Output = Self;")?;
        writeln!(writer)?;
        writeln!(writer, "    fn bitor(self, rhs: Self) -> Self {{")?;
        writeln!(writer, "        Self(self.0 | rhs.0)")?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;

        writeln!(writer, "impl ::core::ops::BitOrAssign for {name} {{")?;
        writeln!(writer, "    fn bitor_assign(&mut self, rhs: Self) {{")?;
        writeln!(writer, "        self.0 |= rhs.0;")?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;

        writeln!(writer, "impl {rt}::serde::Serialize for {name} {{")?;
        writeln!(
            writer,
            "    fn serialize<S>(&self, serializer: S) -> {RESULT}<S::Ok, S::Error>"
        )?;
        writeln!(writer, "    where")?;
        writeln!(writer, "        S: {rt}::serde::Serializer,")?;
        writeln!(writer, "    {{")?;
        writeln!(
            writer,
            "        serializer.serialize_str(&{rt}::join_flags(self.0, Self::NAMES, Self::EXTRAS))"
        )?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        writeln!(writer)?;

        writeln!(writer, "impl<'de> {rt}::serde::Deserialize<'de> for {name} {{")?;
        writeln!(
            writer,
            "    fn deserialize<D>(deserializer: D) -> {RESULT}<Self, D::Error>"
        )?;
        writeln!(writer, "    where")?;
        writeln!(writer, "        D: {rt}::serde::Deserializer<'de>,")?;
        writeln!(writer, "    {{")?;
        writeln!(
            writer,
            "        let wire: {STRING} = {rt}::serde::Deserialize::deserialize(deserializer)?;"
        )?;
        writeln!(writer, "        {rt}::split_flags(&wire, Self::NAMES, Self::EXTRAS)")?;
        writeln!(writer, "            .map(Self)")?;
        writeln!(
            writer,
            "            .ok_or_else(|| <D::Error as {rt}::serde::de::Error>::custom(::std::format!(\"unknown flag in `{{wire}}`\")))"
        )?;
        writeln!(writer, "    }}")?;
        writeln!(writer, "}}")?;
        Ok(())
    }
}

fn serialize_literal(value: &EnumValue) -> String {
    match value {
        EnumValue::String(s) => format!("serializer.serialize_str({s:?})"),
        EnumValue::Bool(b) => format!("serializer.serialize_bool({b})"),
        EnumValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                format!("serializer.serialize_i64({i})")
            } else if let Some(u) = n.as_u64() {
                format!("serializer.serialize_u64({u})")
            } else {
                format!("serializer.serialize_f64({:?})", n.as_f64().unwrap_or_default())
            }
        }
    }
}
