use std::error;
use std::fmt;

/// Error type for Plotly schema code generation.
///
/// Every variant is fatal: the generator never emits partial output.
#[derive(Debug)]
pub enum PlotlySchemaGenError {
    /// Malformed or unrecognized input shape at `path`.
    SchemaParseError { path: String, message: String },

    /// A hard-coded workaround rule no longer matches the schema.
    UnknownWorkaroundTargetError {
        rule: String,
        type_name: String,
        field_name: String,
    },

    /// Two schema nodes resolve to the same generated identifier.
    NamingCollisionError {
        name: String,
        first_path: String,
        second_path: String,
    },

    /// Strict validation found one or more issues (all of them are reported).
    ValidationError(SchemaValidationError),

    /// Generic error with a message.
    GenericError(String),

    /// I/O error (e.g., reading schema file, writing output file).
    IoError(std::io::Error),

    /// JSON parsing error.
    JsonError(serde_json::Error),
}

impl PlotlySchemaGenError {
    pub(crate) fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl error::Error for PlotlySchemaGenError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::IoError(io_error) => Some(io_error),
            Self::JsonError(json_error) => Some(json_error),
            Self::ValidationError(validation_error) => Some(validation_error),
            _ => None,
        }
    }
}

impl fmt::Display for PlotlySchemaGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaParseError { path, message } => {
                write!(f, "schema parse error at {}: {message}", display_path(path))
            }
            Self::UnknownWorkaroundTargetError {
                rule,
                type_name,
                field_name,
            } => write!(
                f,
                "workaround rule `{rule}` targets `{type_name}.{field_name}`, which does not exist in the schema"
            ),
            Self::NamingCollisionError {
                name,
                first_path,
                second_path,
            } => write!(
                f,
                "naming collision: `{name}` is produced by both {} and {}",
                display_path(first_path),
                display_path(second_path)
            ),
            Self::ValidationError(validation_error) => fmt::Display::fmt(validation_error, f),
            Self::GenericError(message) => write!(f, "{message}"),
            Self::IoError(io_error) => fmt::Display::fmt(io_error, f),
            Self::JsonError(json_error) => fmt::Display::fmt(json_error, f),
        }
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

impl From<std::io::Error> for PlotlySchemaGenError {
    fn from(io_error: std::io::Error) -> Self {
        Self::IoError(io_error)
    }
}

impl From<serde_json::Error> for PlotlySchemaGenError {
    fn from(json_error: serde_json::Error) -> Self {
        Self::JsonError(json_error)
    }
}

impl From<SchemaValidationError> for PlotlySchemaGenError {
    fn from(validation_error: SchemaValidationError) -> Self {
        Self::ValidationError(validation_error)
    }
}

/// All issues collected by strict validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    pub issues: Vec<SchemaValidationIssue>,
}

impl error::Error for SchemaValidationError {}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "schema validation failed with {} issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "\n  {}: {}", display_path(&issue.path), issue.kind)?;
        }
        Ok(())
    }
}

/// One problem found during strict validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationIssue {
    pub path: String,
    pub kind: SchemaValidationIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaValidationIssueKind {
    RootNotObject,
    DeclarationNotObject,
    UnknownAttributeKey(String),
    UnknownValType(String),
    InvalidValType,
    EnumeratedMissingValues,
    InvalidEnumValue,
    FlagListMissingFlags,
    TooManyFlags(usize),
    InvalidRegex(String),
    ObjectWithoutAttributes,
    CollectionItemsNotSingle,
    InvalidArrayOk,
}

impl fmt::Display for SchemaValidationIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotObject => f.write_str("schema root must be an object"),
            Self::DeclarationNotObject => f.write_str("attribute declaration must be an object"),
            Self::UnknownAttributeKey(key) => write!(f, "unknown attribute key `{key}`"),
            Self::UnknownValType(tag) => write!(f, "unknown valType `{tag}`"),
            Self::InvalidValType => f.write_str("valType must be a string"),
            Self::EnumeratedMissingValues => {
                f.write_str("enumerated attribute needs a non-empty `values` list")
            }
            Self::InvalidEnumValue => {
                f.write_str("enumerated values must be strings, booleans or numbers")
            }
            Self::FlagListMissingFlags => f.write_str("flaglist attribute needs a `flags` list"),
            Self::TooManyFlags(count) => {
                write!(f, "flaglist declares {count} flags and extras, at most 64 fit")
            }
            Self::InvalidRegex(message) => write!(f, "invalid regex: {message}"),
            Self::ObjectWithoutAttributes => f.write_str("object declares no attributes"),
            Self::CollectionItemsNotSingle => {
                f.write_str("`items` must contain exactly one element declaration")
            }
            Self::InvalidArrayOk => f.write_str("arrayOk must be a boolean"),
        }
    }
}
