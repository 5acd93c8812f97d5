//! Output formatting for metadata, observed values, and check reports.

use chart_readme_core::{Metadata, Parameter};

use crate::render::{display_value, render_sections};
use crate::report::CheckReport;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
    Table,
}

/// Formats scanner output in the requested output format.
pub fn format_metadata(metadata: &Metadata, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(metadata)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(metadata).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(render_sections(metadata)),
        OutputFormat::Table => Ok(parameters_to_table(&metadata.parameters)),
    }
}

/// Formats flattener output in the requested output format.
pub fn format_values(values: &[Parameter], format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(values)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(values).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(values_to_markdown(values)),
        OutputFormat::Table => Ok(parameters_to_table(values)),
    }
}

/// Formats a check report in the requested output format.
pub fn format_report(report: &CheckReport, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(report).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
        OutputFormat::Table => Ok(report_to_table(report)),
    }
}

fn values_to_markdown(values: &[Parameter]) -> String {
    let mut out = String::new();
    out.push_str("| Name | Type | Value |\n");
    out.push_str("|------|------|-------|\n");
    for param in values {
        let kind = param.kind.map(|k| k.as_str()).unwrap_or("");
        out.push_str(&format!(
            "| `{}` | {kind} | `{}` |\n",
            param.name,
            display_value(param)
        ));
    }
    out
}

fn parameters_to_table(params: &[Parameter]) -> String {
    let mut out = String::new();
    let max_name = params.iter().map(|p| p.name.len()).max().unwrap_or(4);

    for param in params {
        let detail = match param.kind {
            Some(kind) => format!("{kind:<8} {}", display_value(param)),
            None => param.description.clone(),
        };
        let mut flags = Vec::new();
        if param.skip {
            flags.push("skip");
        }
        if param.extra {
            flags.push("extra");
        }
        if !param.schema {
            flags.push("no-schema");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", flags.join(","))
        };
        out.push_str(&format!(
            "  {:<width$}  {detail}{flags}\n",
            param.name,
            width = max_name
        ));
    }

    out
}

fn report_to_markdown(report: &CheckReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("# Check Report: {}\n\n", report.values_file));
    out.push_str(&format!(
        "- **Success:** {}\n",
        if report.success { "yes" } else { "no" }
    ));
    out.push_str(&format!("- **Sections:** {}\n", report.sections));
    out.push_str(&format!("- **Documented:** {}\n", report.documented));
    out.push_str(&format!("- **Observed:** {}\n", report.observed));

    if !report.findings.is_empty() {
        out.push_str("\n## Findings\n\n");
        for finding in &report.findings {
            out.push_str(&format!("- `{}`: {}\n", finding.path, finding.code));
        }
    }

    out
}

fn report_to_table(report: &CheckReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Values: {}  Success: {}  Documented: {}  Observed: {}\n",
        report.values_file,
        if report.success { "yes" } else { "no" },
        report.documented,
        report.observed
    ));

    if !report.findings.is_empty() {
        out.push_str("\nFindings:\n");
        let max_code = report
            .findings
            .iter()
            .map(|f| f.code.to_string().len())
            .max()
            .unwrap_or(4);
        for finding in &report.findings {
            out.push_str(&format!(
                "  {:<width$}  {}\n",
                finding.code.to_string(),
                finding.path,
                width = max_code
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use chart_readme_core::ValueKind;
    use serde_yaml::Value;

    use super::*;

    fn sample_values() -> Vec<Parameter> {
        let mut count = Parameter::new("replicaCount");
        count.kind = Some(ValueKind::Number);
        count.value = Some(Value::Number(3.into()));
        vec![count]
    }

    #[test]
    fn test_values_json_uses_type_field() {
        let out = format_values(&sample_values(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["name"], "replicaCount");
        assert_eq!(parsed[0]["type"], "number");
        assert_eq!(parsed[0]["value"], 3);
    }

    #[test]
    fn test_values_table() {
        let out = format_values(&sample_values(), OutputFormat::Table).unwrap();
        assert_eq!(out, "  replicaCount  number   3\n");
    }

    #[test]
    fn test_report_markdown_lists_findings() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(Parameter::new("ghost"), None);
        let report = CheckReport::new("values.yaml", &metadata, &[]);

        let out = format_report(&report, OutputFormat::Markdown).unwrap();
        assert!(out.contains("# Check Report: values.yaml"));
        assert!(out.contains("- **Success:** no"));
        assert!(out.contains("- `ghost`: missing_value"));
    }

    #[test]
    fn test_metadata_yaml() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(Parameter::new("a").with_description("A"), None);
        let out = format_metadata(&metadata, OutputFormat::Yaml).unwrap();
        assert!(out.contains("name: a"));
        assert!(out.contains("description: A"));
    }
}
