//! Markdown parameter tables, one per section.

use chart_readme_core::{Metadata, Parameter, Section, ValueKind};
use serde_yaml::Value;

/// Renders every section as a `###` heading, its description, and a table of
/// its non-skipped parameters.
///
/// Parameters that belong to no section are not rendered.
///
/// # Examples
///
/// ```
/// use chart_readme_core::*;
/// use chart_readme_parser::render::render_sections;
/// use serde_yaml::Value;
///
/// let mut metadata = Metadata::default();
/// let common = metadata.add_section(Section::new("Common parameters"));
/// let mut param = Parameter::new("replicaCount").with_description("Number of replicas");
/// param.kind = Some(ValueKind::Number);
/// param.value = Some(Value::Number(3.into()));
/// metadata.add_parameter(param, Some(common));
///
/// let out = render_sections(&metadata);
/// assert!(out.starts_with("### Common parameters\n"));
/// assert!(out.contains("| `replicaCount` | Number of replicas | `3` |"));
/// ```
pub fn render_sections(metadata: &Metadata) -> String {
    metadata
        .sections
        .iter()
        .map(|section| render_section(metadata, section))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_section(metadata: &Metadata, section: &Section) -> String {
    let mut out = format!("### {}\n\n", section.name);

    if !section.description.is_empty() {
        out.push_str(&section.description.join("\n"));
        out.push_str("\n\n");
    }

    let rows: Vec<&Parameter> = metadata
        .section_parameters(section)
        .filter(|param| !param.skip)
        .collect();
    if rows.is_empty() {
        return out;
    }

    out.push_str("| Name | Description | Value |\n");
    out.push_str("| ---- | ----------- | ----- |\n");
    for param in rows {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            code_cell(&param.name),
            escape_cell(&param.description),
            code_cell(&display_value(param)),
        ));
    }
    out
}

/// Text shown in the value column.
///
/// Strings are quoted, `nil` is bare, empty collections render as `[]`/`{}`,
/// and other collections as compact JSON. A parameter with no value renders
/// as an empty string.
pub fn display_value(param: &Parameter) -> String {
    let Some(value) = &param.value else {
        return String::new();
    };
    match (param.kind, value) {
        (Some(ValueKind::Nil), Value::String(s)) if s == "nil" => "nil".to_string(),
        (_, Value::Null) => "nil".to_string(),
        (_, Value::String(s)) => format!("\"{s}\""),
        (_, Value::Bool(b)) => b.to_string(),
        (_, Value::Number(n)) => n.to_string(),
        (_, Value::Sequence(items)) if items.is_empty() => "[]".to_string(),
        (_, Value::Mapping(map)) if map.is_empty() => "{}".to_string(),
        (_, other) => serde_json::to_string(other).unwrap_or_else(|_| {
            serde_yaml::to_string(other)
                .map(|yaml| yaml.trim_end().replace('\n', " "))
                .unwrap_or_default()
        }),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Wraps `text` in a code span fenced longer than any backtick run inside it.
/// Empty text renders as an empty cell.
fn code_cell(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let longest_run = text
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    let escaped = escape_cell(text);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{fence} {escaped} {fence}")
    } else {
        format!("{fence}{escaped}{fence}")
    }
}
