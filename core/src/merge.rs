//! Reconciliation of documentation and values.
//!
//! The scanner and the flattener each produce parameters keyed by dotted
//! path. [`combine`] copies the runtime side onto the documented side so a
//! renderer sees one record per key.
//!
//! # Example
//!
//! ```
//! use chart_readme_core::*;
//! use serde_yaml::Value;
//!
//! let mut metadata = Metadata::default();
//! metadata.add_parameter(Parameter::new("replicaCount").with_description("Replicas"), None);
//!
//! let mut observed = Parameter::new("replicaCount");
//! observed.kind = Some(ValueKind::Number);
//! observed.value = Some(Value::Number(3.into()));
//!
//! combine(&mut metadata, &[observed]);
//! assert_eq!(metadata.parameters[0].kind, Some(ValueKind::Number));
//! assert_eq!(metadata.parameters[0].description, "Replicas");
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::{Metadata, Parameter};

/// Copies type, value, and schema flags from `values` onto matching documented
/// parameters in `metadata`.
///
/// A documented parameter that already carries a non-empty value keeps it:
/// the first assignment wins. Documented parameters with no observed
/// counterpart are left untouched.
pub fn combine(metadata: &mut Metadata, values: &[Parameter]) {
    let by_name: HashMap<&str, &Parameter> = values
        .iter()
        .rev()
        .map(|value| (value.name.as_str(), value))
        .collect();

    for param in &mut metadata.parameters {
        let Some(observed) = by_name.get(param.name.as_str()) else {
            debug!(parameter = %param.name, "No value found for documented parameter");
            continue;
        };
        if !param.has_value() && !param.extra {
            param.value = observed.value.clone();
        }
        param.kind = observed.kind;
        param.schema = observed.schema;
    }
}

#[cfg(test)]
mod tests {
    use serde_yaml::Value;

    use super::*;
    use crate::ValueKind;

    fn observed(name: &str, value: Value) -> Parameter {
        let mut param = Parameter::new(name);
        param.kind = Some(ValueKind::of(&value));
        param.value = Some(value);
        param
    }

    #[test]
    fn test_combine_keeps_existing_value() {
        let mut metadata = Metadata::default();
        let mut documented = Parameter::new("image.tag");
        documented.value = Some(Value::String("pinned".into()));
        metadata.add_parameter(documented, None);

        combine(&mut metadata, &[observed("image.tag", Value::String("latest".into()))]);

        let param = &metadata.parameters[0];
        assert_eq!(param.value, Some(Value::String("pinned".into())));
        assert_eq!(param.kind, Some(ValueKind::String));
    }

    #[test]
    fn test_combine_extra_keeps_empty_value() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(Parameter::new("docs").extra(), None);

        combine(&mut metadata, &[observed("docs", Value::Bool(true))]);

        assert_eq!(
            metadata.parameters[0].value,
            Some(Value::String(String::new()))
        );
    }

    #[test]
    fn test_combine_copies_schema_flag() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(Parameter::new("podAnnotations.prometheus.io/scrape"), None);

        let mut value = observed("podAnnotations.prometheus.io/scrape", Value::String("true".into()));
        value.schema = false;
        combine(&mut metadata, &[value]);

        assert!(!metadata.parameters[0].schema);
        assert!(metadata.parameters[0].has_value());
    }

    #[test]
    fn test_combine_leaves_unmatched_parameters_alone() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(Parameter::new("missing"), None);

        combine(&mut metadata, &[observed("other", Value::Null)]);

        assert!(metadata.parameters[0].kind.is_none());
        assert!(metadata.parameters[0].value.is_none());
    }
}
