//! Dual-format specification parser.
//!
//! OpenAPI v3 always gets first refusal: a document is only read as Swagger v2
//! when it does not declare itself as v3. Documents may be JSON or YAML.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{Info, NormalizedSpec, PathEntry, SchemaEntry, SpecVersion};
use crate::error::DocError;

/// Parses raw specification text into a [`NormalizedSpec`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecParser;

impl SpecParser {
    pub const fn new() -> Self {
        Self
    }

    /// Parse `raw` as OpenAPI v3, falling back to Swagger v2.
    pub fn parse(&self, raw: &str) -> Result<NormalizedSpec, DocError> {
        let Some(document) = read_document(raw) else {
            let error = DocError::illegal_spec("input is not a JSON or YAML object");
            tracing::error!(error = %error, "Failed to parse OpenAPI specification");
            return Err(error);
        };

        if let Some(spec) = parse_v3(&document) {
            tracing::debug!(
                title = spec.title(),
                paths = spec.paths().len(),
                schemas = spec.schemas().len(),
                "Parsed OpenAPI v3 specification"
            );
            return Ok(spec);
        }

        if let Some(spec) = parse_v2(&document) {
            tracing::debug!(
                title = spec.title(),
                paths = spec.paths().len(),
                schemas = spec.schemas().len(),
                "Parsed Swagger v2 specification"
            );
            return Ok(spec);
        }

        let error = DocError::illegal_spec("document declares neither `openapi: 3.x` nor `swagger: 2.x`");
        tracing::error!(error = %error, "Failed to parse OpenAPI specification");
        Err(error)
    }
}

/// JSON first, then YAML. Only mappings qualify as documents.
fn read_document(raw: &str) -> Option<Map<String, Value>> {
    if raw.trim().is_empty() {
        return None;
    }
    let value = serde_json::from_str::<Value>(raw)
        .or_else(|_| serde_yaml::from_str::<Value>(raw))
        .ok()?;
    match value {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// String or number as text, accepting YAML's unquoted numbers (`swagger: 2.0`)
fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn declared_version(document: &Map<String, Value>, field: &str) -> Option<String> {
    scalar_text(document.get(field))
}

/// Field by field, so one malformed entry does not discard the others
fn read_info(document: &Map<String, Value>) -> Info {
    let Some(info) = document.get("info") else {
        return Info::default();
    };
    let text = |field: &str| info.get(field).and_then(Value::as_str).map(str::to_string);
    Info {
        title: text("title"),
        description: text("description"),
        version: scalar_text(info.get("version")),
    }
}

fn object_at<'a>(value: Option<&'a Value>) -> impl Iterator<Item = (&'a String, &'a Value)> {
    value.and_then(Value::as_object).into_iter().flatten()
}

fn parse_v3(document: &Map<String, Value>) -> Option<NormalizedSpec> {
    let version = declared_version(document, "openapi")?;
    if !version.starts_with('3') {
        return None;
    }

    let info = read_info(document);
    let paths: BTreeMap<_, _> = object_at(document.get("paths"))
        .map(|(path, item)| (path.clone(), PathEntry::from_v3(path, item)))
        .collect();
    let schemas: BTreeMap<_, _> = object_at(
        document
            .get("components")
            .and_then(|components| components.get("schemas")),
    )
    .map(|(name, schema)| (name.clone(), SchemaEntry::from_v3(name, schema)))
    .collect();

    Some(NormalizedSpec::new(
        SpecVersion::OpenApiV3(version),
        info.title,
        info.description,
        paths,
        schemas,
    ))
}

fn parse_v2(document: &Map<String, Value>) -> Option<NormalizedSpec> {
    let version = declared_version(document, "swagger")?;
    if !version.starts_with('2') {
        return None;
    }

    let info = read_info(document);
    let paths: BTreeMap<_, _> = object_at(document.get("paths"))
        .map(|(path, item)| (path.clone(), PathEntry::from_v2(path, item)))
        .collect();
    let schemas: BTreeMap<_, _> = object_at(document.get("definitions"))
        .map(|(name, model)| (name.clone(), SchemaEntry::from_v2(name, model)))
        .collect();

    Some(NormalizedSpec::new(
        SpecVersion::SwaggerV2(version),
        info.title,
        info.description,
        paths,
        schemas,
    ))
}
