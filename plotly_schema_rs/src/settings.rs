//! Settings for Plotly schema code generation.

use crate::workaround::WorkaroundRule;

/// Wire keys that become parameters of each generated type's `new` constructor
/// when the type declares them.
pub const DEFAULT_CONVENIENCE_FIELDS: &[&str] = &[
    "name",
    "x",
    "y",
    "z",
    "text",
    "values",
    "labels",
    "lat",
    "lon",
    "r",
    "theta",
    "open",
    "high",
    "low",
    "close",
];

/// Which workaround rules run after synthesis.
#[derive(Debug, Clone, Default)]
pub enum WorkaroundSelection {
    /// The built-in rules, applied to full plot schema documents only.
    #[default]
    Auto,
    /// No rules at all.
    Disabled,
    /// Exactly these rules, whatever the input shape.
    Custom(Vec<WorkaroundRule>),
}

/// Settings that control code generation behavior.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// Name of the top-level type generated for a bare attribute tree.
    /// Ignored for full plot schema documents, whose top-level types are the
    /// traces, `Layout`, the transforms and `Frame`.
    ///
    /// **Default: `"Root"`.**
    pub root_name: String,

    /// Path under which the emitted code finds the runtime support types
    /// (`Data`, `Anything`, `SubplotId`, the `Trace` and `Transform` traits, and
    /// re-exports of `serde` and `serde_json`).
    ///
    /// **Default: `"::plotly_schema_rs::runtime"`.**
    pub runtime_path: String,

    /// When true, fail before code generation if the schema contains unknown
    /// keys or malformed declarations. Collects all issues and returns them
    /// together.
    ///
    /// **Default: false (disabled).** Consumers must opt in; when false,
    /// unknown keys are ignored and only shapes the parser cannot read fail.
    pub deny_unknown_schema_keys: bool,

    pub workarounds: WorkaroundSelection,

    /// Hoist enums with identical cases under the same attribute name into one
    /// shared type (e.g. every trace's `visible` uses one `Visible`).
    ///
    /// **Default: true.**
    pub share_enums: bool,

    /// Wire keys promoted to `new` constructor parameters.
    pub convenience_fields: Vec<String>,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            root_name: "Root".to_string(),
            runtime_path: "::plotly_schema_rs::runtime".to_string(),
            deny_unknown_schema_keys: false,
            workarounds: WorkaroundSelection::default(),
            share_enums: true,
            convenience_fields: DEFAULT_CONVENIENCE_FIELDS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}
