//! Documentation extraction for annotated chart values files.
//!
//! A values file is read twice:
//!
//! - the [`scanner`] reads the raw text and turns `## @param`, `## @section`,
//!   `## @skip`, `## @extra` and description tags into [`Metadata`];
//! - the [`values`] pass parses the YAML and produces one observed
//!   [`Parameter`] per dotted leaf path, with its type and value.
//!
//! Both sides are keyed by dotted path. [`Documentation`] runs both passes,
//! checks that they agree, and [`Documentation::prepare`] merges them into
//! render-ready metadata for the [`render`] module.
//!
//! # Main entry points
//!
//! - [`scan_metadata`] / [`read_metadata`]: comment-tag scan of text or a file
//! - [`values::flatten_values`] / [`read_values`]: observed values
//! - [`Documentation::from_file`]: both passes plus the consistency report
//!
//! # Example
//!
//! ```
//! use chart_readme_core::ReadmeConfig;
//! use chart_readme_parser::Documentation;
//! use chart_readme_parser::render::render_sections;
//!
//! let text = concat!(
//!     "## @section Common parameters\n",
//!     "## @param replicaCount Number of replicas\n",
//!     "replicaCount: 3\n",
//! );
//!
//! let config = ReadmeConfig::default();
//! let docs = Documentation::from_text("values.yaml", text, &config).unwrap();
//! assert!(docs.report.success);
//!
//! let prepared = docs.prepare(&config).unwrap();
//! let table = render_sections(&prepared);
//! assert!(table.contains("| `replicaCount` | Number of replicas | `3` |"));
//! ```
//!
//! # Crate type
//!
//! This is a **library-only crate**. The `readme-generator` binary lives in
//! the `chart-readme-cli` crate.
//!
//! [`Metadata`]: chart_readme_core::Metadata
//! [`Parameter`]: chart_readme_core::Parameter

pub mod flatten;
pub mod output;
pub mod render;
pub mod report;
pub mod scanner;
pub mod values;

use std::path::Path;

use chart_readme_core::{Metadata, Parameter, ReadmeConfig, Result, apply_modifiers, combine};
use report::CheckReport;
use scanner::CommentScanner;
use tracing::info;

/// Scans annotated values text for documentation tags.
///
/// # Errors
///
/// Returns [`InvalidPattern`](chart_readme_core::Error::InvalidPattern) if the
/// configured tags do not form valid patterns.
pub fn scan_metadata(text: &str, config: &ReadmeConfig) -> Result<Metadata> {
    let scanner = CommentScanner::new(config)?;
    Ok(scanner.scan(text))
}

/// Reads a values file and scans it for documentation tags.
///
/// # Errors
///
/// Returns [`Io`](chart_readme_core::Error::Io) if the file cannot be read.
pub fn read_metadata(path: impl AsRef<Path>, config: &ReadmeConfig) -> Result<Metadata> {
    let text = std::fs::read_to_string(path)?;
    scan_metadata(&text, config)
}

/// Reads a values file and flattens its YAML content.
///
/// # Errors
///
/// Returns [`Io`](chart_readme_core::Error::Io) if the file cannot be read, or
/// [`Yaml`](chart_readme_core::Error::Yaml) if it is not valid YAML.
pub fn read_values(path: impl AsRef<Path>) -> Result<Vec<Parameter>> {
    let text = std::fs::read_to_string(path)?;
    values::flatten_values(&text)
}

/// Both extraction passes over one values file, plus their consistency report.
#[derive(Debug, Clone)]
pub struct Documentation {
    pub metadata: Metadata,
    pub values: Vec<Parameter>,
    pub report: CheckReport,
}

impl Documentation {
    /// Runs both passes over `text`. `source` names the file in the report.
    ///
    /// # Errors
    ///
    /// Returns [`Yaml`](chart_readme_core::Error::Yaml) for invalid YAML or
    /// [`InvalidPattern`](chart_readme_core::Error::InvalidPattern) for an
    /// unusable configuration.
    pub fn from_text(source: &str, text: &str, config: &ReadmeConfig) -> Result<Self> {
        let metadata = scan_metadata(text, config)?;
        let values = values::flatten_values(text)?;
        let report = CheckReport::new(source, &metadata, &values);
        info!(
            source,
            sections = report.sections,
            documented = report.documented,
            observed = report.observed,
            findings = report.findings.len(),
            "Documented values file"
        );
        Ok(Self {
            metadata,
            values,
            report,
        })
    }

    /// Reads `path` and runs both passes.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](chart_readme_core::Error::Io) if the file cannot be read,
    /// plus the errors of [`from_text`](Self::from_text).
    pub fn from_file(path: impl AsRef<Path>, config: &ReadmeConfig) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&path.display().to_string(), &text, config)
    }

    /// Merges observed values into the metadata and applies modifiers to every
    /// non-skipped parameter.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownModifier`](chart_readme_core::Error::UnknownModifier)
    /// for a modifier the configuration does not define.
    pub fn prepare(&self, config: &ReadmeConfig) -> Result<Metadata> {
        let mut metadata = self.metadata.clone();
        combine(&mut metadata, &self.values);
        for param in metadata.parameters.iter_mut().filter(|p| !p.skip) {
            apply_modifiers(param, &config.modifiers)?;
        }
        Ok(metadata)
    }
}
