//! Consistency checks between documentation and values.
//!
//! Every key in the values file should be documented, and every documented key
//! should exist in the values file. Skipped parameters silence their whole
//! subtree; extra parameters are allowed to have no value.
//!
//! # Examples
//!
//! ```
//! use chart_readme_core::*;
//!
//! let mut metadata = Metadata::default();
//! metadata.add_parameter(Parameter::new("replicaCount"), None);
//! metadata.add_parameter(Parameter::new("ghost"), None);
//!
//! let values = vec![Parameter::new("replicaCount"), Parameter::new("image.tag")];
//! let errors = check_keys(&metadata, &values);
//! assert_eq!(
//!     errors,
//!     vec![
//!         CheckError::MissingMetadata("image.tag".into()),
//!         CheckError::MissingValue("ghost".into()),
//!     ]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Metadata, Parameter};

/// Mismatch between the documented and the observed keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckError {
    /// A key exists in the values file but no tag documents it.
    #[error("missing metadata for key: {0}")]
    MissingMetadata(String),
    /// A tag documents a key that does not exist in the values file.
    #[error("documented key has no value: {0}")]
    MissingValue(String),
}

/// Compares documented parameters against flattened values.
///
/// Errors are reported in values order first, then documentation order.
pub fn check_keys(metadata: &Metadata, values: &[Parameter]) -> Vec<CheckError> {
    let documented: HashSet<&str> = metadata
        .parameters
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    let observed: HashSet<&str> = values.iter().map(|p| p.name.as_str()).collect();
    let skipped: Vec<&Parameter> = metadata.parameters.iter().filter(|p| p.skip).collect();

    let mut errors = Vec::new();

    for value in values {
        if documented.contains(value.name.as_str()) {
            continue;
        }
        if skipped.iter().any(|s| s.covers(&value.name)) {
            continue;
        }
        errors.push(CheckError::MissingMetadata(value.name.clone()));
    }

    for param in &metadata.parameters {
        if param.skip || param.extra {
            continue;
        }
        if !observed.contains(param.name.as_str()) {
            errors.push(CheckError::MissingValue(param.name.clone()));
        }
    }

    errors
}
