//! Observed values of a values file, one [`Parameter`] per dotted leaf path.
//!
//! Every leaf is resolved by a direct path lookup. When that fails because a
//! key contains the separator, the literal-key lookup is used and the entry is
//! marked `schema = false`. Arrays whose items are all strings collapse into
//! one entry named by the array's path.

use std::collections::HashSet;

use chart_readme_core::{Parameter, Result, ValueKind};
use serde_yaml::Value;
use tracing::{debug, info};

use crate::flatten::{flatten, lookup, lookup_literal};

/// Parses `text` as YAML and returns its observed parameters.
///
/// # Errors
///
/// Returns [`Yaml`](chart_readme_core::Error::Yaml) if the text is not valid
/// YAML.
///
/// # Examples
///
/// ```
/// use chart_readme_core::ValueKind;
/// use chart_readme_parser::values::flatten_values;
/// use serde_yaml::Value;
///
/// let params = flatten_values("replicaCount: 3\nargs: [--a, --b]\nsidecar: null\n").unwrap();
/// let summary: Vec<_> = params
///     .iter()
///     .map(|p| (p.name.as_str(), p.kind))
///     .collect();
/// assert_eq!(
///     summary,
///     vec![
///         ("replicaCount", Some(ValueKind::Number)),
///         ("args", Some(ValueKind::Array)),
///         ("sidecar", Some(ValueKind::Nil)),
///     ]
/// );
/// assert_eq!(params[2].value, Some(Value::String("nil".into())));
/// ```
pub fn flatten_values(text: &str) -> Result<Vec<Parameter>> {
    let root: Value = serde_yaml::from_str(text)?;
    let params = collect_parameters(&root);
    info!(parameters = params.len(), "Flattened values");
    Ok(params)
}

/// Builds observed parameters from an already parsed value tree.
pub fn collect_parameters(root: &Value) -> Vec<Parameter> {
    let mut params = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for (path, leaf) in flatten(root) {
        let (mut value, schema) = resolve(root, &path).unwrap_or_else(|| {
            debug!(path = %path, "Path did not resolve; using flattened leaf");
            (leaf, false)
        });
        let mut name = path;

        if let Some((prefix, array)) = plain_array(root, &name) {
            name = prefix;
            value = array;
        }

        if !seen.insert(name.clone()) {
            continue;
        }
        params.push(observed(name, value, schema));
    }

    params
}

/// Resolves a flattened path to its value and schema-renderability.
fn resolve<'v>(root: &'v Value, path: &str) -> Option<(&'v Value, bool)> {
    if let Some(value) = lookup(root, path) {
        return Some((value, true));
    }
    let value = lookup_literal(root, path)?;
    debug!(path = %path, "Resolved by literal key match; not schema-renderable");
    Some((value, false))
}

/// For a path inside an array of strings, returns the array's path and value.
///
/// Only the innermost enclosing array is inspected.
fn plain_array<'v>(root: &'v Value, path: &str) -> Option<(String, &'v Value)> {
    let open = path.rfind('[')?;
    let prefix = &path[..open];
    let array = lookup(root, prefix).or_else(|| lookup_literal(root, prefix))?;
    let Value::Sequence(items) = array else {
        return None;
    };
    let plain = items.iter().all(|item| matches!(item, Value::String(_)));
    plain.then(|| (prefix.to_string(), array))
}

fn observed(name: String, value: &Value, schema: bool) -> Parameter {
    let mut param = Parameter::new(name);
    let value = match value {
        Value::Tagged(tagged) => &tagged.value,
        other => other,
    };
    param.kind = Some(ValueKind::of(value));
    param.value = Some(match value {
        Value::Null => Value::String("nil".to_string()),
        other => other.clone(),
    });
    param.schema = schema;
    param
}
