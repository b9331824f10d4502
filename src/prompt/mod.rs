//! Prompt construction.
//!
//! [`PromptBuilder::build_prompt`] is pure and infallible: missing fields are
//! substituted and unrecognized entries degrade to placeholder lines. Output
//! is deterministic because the spec's maps are ordered.

pub mod template;

use std::collections::BTreeMap;

use crate::spec::{HttpMethod, NormalizedSpec, PathEntry, SchemaEntry};

pub const NO_API_DESCRIPTION: &str = "This API has no description.";
pub const UNNAMED_OPERATION: &str = "UnnamedOperation";
pub const NO_SUMMARY: &str = "No summary available.";
pub const NO_SCHEMA_DESCRIPTION: &str = "No description available.";
pub const UNPROCESSABLE_ENDPOINT: &str = "  - Unable to process this endpoint type";

/// Renders the documentation-generation prompt for a spec
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub const fn new() -> Self {
        Self
    }

    pub fn build_prompt(&self, spec: &NormalizedSpec) -> String {
        let endpoints = summarize_endpoints(spec.paths());
        let schemas = summarize_schemas(spec.schemas());
        template::render(template::TemplateVars {
            title: spec.title(),
            description: spec.description().unwrap_or(NO_API_DESCRIPTION),
            endpoints: &endpoints,
            schemas: &schemas,
        })
    }
}

fn summarize_endpoints(paths: &BTreeMap<String, PathEntry>) -> String {
    paths
        .iter()
        .map(|(path, entry)| format_path(path, entry))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_path(path: &str, entry: &PathEntry) -> String {
    let mut lines = vec![format!("- `{path}`")];
    match entry {
        PathEntry::V3(item) => lines.extend(item.operations().map(|(method, op)| {
            format_operation(method, op.operation_id.as_deref(), op.summary.as_deref())
        })),
        PathEntry::V2(item) => lines.extend(item.operation_map().into_iter().map(|(method, op)| {
            format_operation(method, op.operation_id.as_deref(), op.summary.as_deref())
        })),
        PathEntry::Unrecognized(_) => {
            tracing::warn!(path, "Unknown path entry shape, rendering placeholder");
            lines.push(UNPROCESSABLE_ENDPOINT.to_string());
        }
    }
    lines.join("\n")
}

fn format_operation(method: HttpMethod, operation_id: Option<&str>, summary: Option<&str>) -> String {
    format!(
        "  - **{method} {}**: {}",
        operation_id.unwrap_or(UNNAMED_OPERATION),
        summary.unwrap_or(NO_SUMMARY)
    )
}

fn summarize_schemas(schemas: &BTreeMap<String, SchemaEntry>) -> String {
    schemas
        .iter()
        .map(|(name, entry)| {
            if let SchemaEntry::Unrecognized(_) = entry {
                tracing::warn!(name, "Unknown schema entry shape");
            }
            format!(
                "- `{name}`: {}",
                entry.description().unwrap_or(NO_SCHEMA_DESCRIPTION)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
