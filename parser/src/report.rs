//! Structured consistency reporting for a values file.

use chart_readme_core::{CheckError, Metadata, Parameter, check_keys};
use serde::{Deserialize, Serialize};

/// Structured code for one consistency finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCode {
    /// Key present in the values file but not documented.
    MissingMetadata,
    /// Documented key absent from the values file.
    MissingValue,
}

impl std::fmt::Display for FindingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingMetadata => write!(f, "missing_metadata"),
            Self::MissingValue => write!(f, "missing_value"),
        }
    }
}

/// One finding: a code and the dotted path it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub code: FindingCode,
    pub path: String,
}

impl From<&CheckError> for Finding {
    fn from(error: &CheckError) -> Self {
        match error {
            CheckError::MissingMetadata(path) => Self {
                code: FindingCode::MissingMetadata,
                path: path.clone(),
            },
            CheckError::MissingValue(path) => Self {
                code: FindingCode::MissingValue,
                path: path.clone(),
            },
        }
    }
}

/// Per-file check report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub values_file: String,
    pub success: bool,
    pub sections: usize,
    pub documented: usize,
    pub observed: usize,
    pub skipped: usize,
    pub extras: usize,
    /// Observed paths that needed literal key matching to resolve.
    pub not_schema_renderable: Vec<String>,
    pub findings: Vec<Finding>,
}

impl CheckReport {
    /// Runs [`check_keys`] and summarizes both passes.
    pub fn new(values_file: impl Into<String>, metadata: &Metadata, values: &[Parameter]) -> Self {
        let findings: Vec<Finding> = check_keys(metadata, values)
            .iter()
            .map(Finding::from)
            .collect();

        Self {
            values_file: values_file.into(),
            success: findings.is_empty(),
            sections: metadata.sections.len(),
            documented: metadata.parameters.len(),
            observed: values.len(),
            skipped: metadata.parameters.iter().filter(|p| p.skip).count(),
            extras: metadata.parameters.iter().filter(|p| p.extra).count(),
            not_schema_renderable: values
                .iter()
                .filter(|p| !p.schema)
                .map(|p| p.name.clone())
                .collect(),
            findings,
        }
    }

    /// Findings with the given code.
    pub fn paths(&self, code: FindingCode) -> impl Iterator<Item = &str> {
        self.findings
            .iter()
            .filter(move |f| f.code == code)
            .map(|f| f.path.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finding_code_display_matches_serde() {
        let codes = [
            (FindingCode::MissingMetadata, "missing_metadata"),
            (FindingCode::MissingValue, "missing_value"),
        ];

        for (code, expected) in codes {
            assert_eq!(code.to_string(), expected);
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{expected}\""));
        }
    }

    #[test]
    fn test_report_counts() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(Parameter::new("a"), None);
        metadata.add_parameter(Parameter::new("b").skipped(), None);
        metadata.add_parameter(Parameter::new("c").extra(), None);
        metadata.add_parameter(Parameter::new("gone"), None);

        let mut dotted = Parameter::new("x.y/z");
        dotted.schema = false;
        let values = vec![Parameter::new("a"), Parameter::new("b.inner"), dotted];

        let report = CheckReport::new("values.yaml", &metadata, &values);
        assert!(!report.success);
        assert_eq!(report.documented, 4);
        assert_eq!(report.observed, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.extras, 1);
        assert_eq!(report.not_schema_renderable, vec!["x.y/z"]);
        assert_eq!(
            report.paths(FindingCode::MissingMetadata).collect::<Vec<_>>(),
            vec!["x.y/z"]
        );
        assert_eq!(
            report.paths(FindingCode::MissingValue).collect::<Vec<_>>(),
            vec!["gone"]
        );
    }
}
