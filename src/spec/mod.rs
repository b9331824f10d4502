//! Version-agnostic specification model.
//!
//! `SpecParser` turns raw OpenAPI v3 or Swagger v2 text into a
//! [`NormalizedSpec`]. Path and schema entries stay per-version
//! ([`PathEntry`], [`SchemaEntry`]) so rendering can pick the verbs and fields
//! each format actually has, instead of flattening them early.

mod lenient;
pub mod parser;
pub mod v2;
pub mod v3;

pub use parser::SpecParser;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Title used when the document's `info` has none
pub const NO_TITLE: &str = "No title";

/// HTTP verbs an operation can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Patch => "PATCH",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document metadata shared by both formats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// Source format and its declared version string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecVersion {
    /// `openapi: 3.x`
    OpenApiV3(String),
    /// `swagger: 2.0`
    SwaggerV2(String),
}

impl SpecVersion {
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenApiV3(_) => "OpenAPI v3",
            Self::SwaggerV2(_) => "Swagger v2",
        }
    }
}

/// One entry of the `paths` map, kept in its source shape
#[derive(Debug, Clone, PartialEq)]
pub enum PathEntry {
    V3(v3::PathItem),
    V2(v2::PathItem),
    /// Entry whose shape matched neither format
    Unrecognized(Value),
}

impl PathEntry {
    pub fn from_v3(path: &str, value: &Value) -> Self {
        match serde_json::from_value::<v3::PathItem>(value.clone()) {
            Ok(item) => Self::V3(item),
            Err(e) => {
                tracing::warn!(path, error = %e, "Unrecognized OpenAPI v3 path item");
                Self::Unrecognized(value.clone())
            }
        }
    }

    pub fn from_v2(path: &str, value: &Value) -> Self {
        match serde_json::from_value::<v2::PathItem>(value.clone()) {
            Ok(item) => Self::V2(item),
            Err(e) => {
                tracing::warn!(path, error = %e, "Unrecognized Swagger v2 path item");
                Self::Unrecognized(value.clone())
            }
        }
    }
}

/// One named schema (`components.schemas` in v3, `definitions` in v2)
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEntry {
    V3(v3::Schema),
    V2(v2::Model),
    /// Entry whose shape matched neither format (e.g. a boolean schema)
    Unrecognized(Value),
}

impl SchemaEntry {
    pub fn from_v3(name: &str, value: &Value) -> Self {
        match serde_json::from_value::<v3::Schema>(value.clone()) {
            Ok(schema) => Self::V3(schema),
            Err(e) => {
                tracing::warn!(name, error = %e, "Unrecognized OpenAPI v3 schema");
                Self::Unrecognized(value.clone())
            }
        }
    }

    pub fn from_v2(name: &str, value: &Value) -> Self {
        match serde_json::from_value::<v2::Model>(value.clone()) {
            Ok(model) => Self::V2(model),
            Err(e) => {
                tracing::warn!(name, error = %e, "Unrecognized Swagger v2 model");
                Self::Unrecognized(value.clone())
            }
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            Self::V3(schema) => schema.description.as_deref(),
            Self::V2(model) => model.description.as_deref(),
            Self::Unrecognized(_) => None,
        }
    }
}

/// The normalized, read-only view of an API specification.
///
/// Owns its maps outright, so nothing held by the parser can alter it after
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSpec {
    version: SpecVersion,
    title: String,
    description: Option<String>,
    paths: BTreeMap<String, PathEntry>,
    schemas: BTreeMap<String, SchemaEntry>,
}

impl NormalizedSpec {
    /// Build a spec; a missing title becomes [`NO_TITLE`]
    pub fn new(
        version: SpecVersion,
        title: Option<String>,
        description: Option<String>,
        paths: BTreeMap<String, PathEntry>,
        schemas: BTreeMap<String, SchemaEntry>,
    ) -> Self {
        Self {
            version,
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            description,
            paths,
            schemas,
        }
    }

    pub fn version(&self) -> &SpecVersion {
        &self.version
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn paths(&self) -> &BTreeMap<String, PathEntry> {
        &self.paths
    }

    pub fn schemas(&self) -> &BTreeMap<String, SchemaEntry> {
        &self.schemas
    }
}
