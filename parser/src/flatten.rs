//! Dotted-path flattening and lookup over YAML value trees.
//!
//! Paths join mapping keys with `.` and address sequence items with `[n]`, so
//! `{image: {pullSecrets: [a]}}` flattens to `image.pullSecrets[0]`. Keys that
//! themselves contain `.` (`prometheus.io/scrape`) make a path ambiguous:
//! [`lookup`] cannot resolve them, while [`lookup_literal`] can, by matching
//! whole keys against the path text.

use serde_yaml::Value;

/// One segment of a dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Flattens `root` into `(path, leaf)` pairs in document order.
///
/// Leaves are scalars, `null`, empty mappings, and empty sequences. A scalar
/// root produces no entries.
///
/// # Examples
///
/// ```
/// use chart_readme_parser::flatten::flatten;
///
/// let root: serde_yaml::Value = serde_yaml::from_str("a:\n  b: 1\n  c: [x, {d: true}]\ne: {}\n").unwrap();
/// let paths: Vec<_> = flatten(&root).into_iter().map(|(path, _)| path).collect();
/// assert_eq!(paths, vec!["a.b", "a.c[0]", "a.c[1].d", "e"]);
/// ```
pub fn flatten(root: &Value) -> Vec<(String, &Value)> {
    let mut out = Vec::new();
    match root {
        Value::Mapping(_) | Value::Sequence(_) | Value::Tagged(_) => {
            walk(root, String::new(), &mut out);
        }
        _ => {}
    }
    out
}

fn walk<'v>(node: &'v Value, path: String, out: &mut Vec<(String, &'v Value)>) {
    match node {
        Value::Mapping(map) if !map.is_empty() => {
            for (key, child) in map {
                let Some(key) = key_text(key) else {
                    continue;
                };
                let child_path = if path.is_empty() {
                    key
                } else {
                    format!("{path}.{key}")
                };
                walk(child, child_path, out);
            }
        }
        Value::Sequence(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                walk(child, format!("{path}[{index}]"), out);
            }
        }
        Value::Tagged(tagged) => walk(&tagged.value, path, out),
        _ if !path.is_empty() => out.push((path, node)),
        _ => {}
    }
}

/// Text used for a mapping key in paths; `None` for collection keys.
pub(crate) fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => key_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Splits a dotted path on `.` and `[n]`.
///
/// # Examples
///
/// ```
/// use chart_readme_parser::flatten::{split_path, PathSegment};
///
/// assert_eq!(
///     split_path("a.b[2].c"),
///     vec![
///         PathSegment::Key("a".into()),
///         PathSegment::Key("b".into()),
///         PathSegment::Index(2),
///         PathSegment::Key("c".into()),
///     ]
/// );
/// ```
pub fn split_path(path: &str) -> Vec<PathSegment> {
    let mut segments = Vec::new();
    for part in path.split('.') {
        let (key, mut rest) = match part.find('[') {
            Some(open) => part.split_at(open),
            None => (part, ""),
        };
        if !key.is_empty() {
            segments.push(PathSegment::Key(key.to_string()));
        }
        while let Some(index) = parse_index(rest) {
            segments.push(PathSegment::Index(index.0));
            rest = index.1;
        }
        if !rest.is_empty() {
            // Not a clean `[n]` suffix; keep the remainder as part of the key.
            segments.push(PathSegment::Key(rest.to_string()));
        }
    }
    segments
}

/// Parses a leading `[n]`, returning `n` and the text after `]`.
fn parse_index(text: &str) -> Option<(usize, &str)> {
    let inner = text.strip_prefix('[')?;
    let close = inner.find(']')?;
    let index = inner[..close].parse().ok()?;
    Some((index, &inner[close + 1..]))
}

/// Resolves `path` by walking its segments.
///
/// Fails for paths whose keys contain `.` because the split no longer lines
/// up with the tree.
pub fn lookup<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    let mut node = root;
    for segment in split_path(path) {
        node = untag(node);
        node = match (segment, node) {
            (PathSegment::Key(key), Value::Mapping(map)) => map
                .iter()
                .find(|(k, _)| key_text(k).as_deref() == Some(key.as_str()))
                .map(|(_, v)| v)?,
            (PathSegment::Index(index), Value::Sequence(items)) => items.get(index)?,
            _ => return None,
        };
    }
    Some(untag(node))
}

/// Resolves `path` by matching whole mapping keys against the path text.
///
/// At each mapping, keys that prefix the remaining path (followed by `.`, `[`
/// or the end) are tried longest first, so `a.b.c` finds `{a: {"b.c": 1}}`.
pub fn lookup_literal<'v>(root: &'v Value, path: &str) -> Option<&'v Value> {
    let node = untag(root);
    if path.is_empty() {
        return Some(node);
    }
    match node {
        Value::Mapping(map) => {
            let mut candidates: Vec<(usize, &Value)> = map
                .iter()
                .filter_map(|(key, child)| {
                    let key = key_text(key)?;
                    let rest = path.strip_prefix(key.as_str())?;
                    let boundary = rest.is_empty() || rest.starts_with('.') || rest.starts_with('[');
                    boundary.then_some((key.len(), child))
                })
                .collect();
            candidates.sort_by(|a, b| b.0.cmp(&a.0));
            candidates.into_iter().find_map(|(len, child)| {
                let rest = &path[len..];
                lookup_literal(child, rest.strip_prefix('.').unwrap_or(rest))
            })
        }
        Value::Sequence(items) => {
            let (index, rest) = parse_index(path)?;
            let child = items.get(index)?;
            lookup_literal(child, rest.strip_prefix('.').unwrap_or(rest))
        }
        _ => None,
    }
}

fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}
