//! JSON schema generation from documented parameters.

use chart_readme_core::{Metadata, Parameter, ValueKind};
use serde_json::{Map, Value as Json, json};
use serde_yaml::Value;
use tracing::debug;

/// Builds a draft-07 object schema from the documented parameters.
///
/// Skipped parameters, parameters marked `schema = false`, and paths that
/// address individual array items are left out.
///
/// # Examples
///
/// ```
/// use chart_readme_core::*;
/// use chart_readme_parser::render::build_schema;
/// use serde_yaml::Value;
///
/// let mut metadata = Metadata::default();
/// let mut tag = Parameter::new("image.tag").with_description("Image tag");
/// tag.kind = Some(ValueKind::String);
/// tag.value = Some(Value::String("1.0".into()));
/// metadata.add_parameter(tag, None);
///
/// let schema = build_schema(&metadata);
/// let leaf = &schema["properties"]["image"]["properties"]["tag"];
/// assert_eq!(leaf["type"], "string");
/// assert_eq!(leaf["default"], "1.0");
/// ```
pub fn build_schema(metadata: &Metadata) -> Json {
    let mut properties = Map::new();

    for param in &metadata.parameters {
        if param.skip || !param.schema {
            continue;
        }
        if param.name.contains('[') {
            debug!(parameter = %param.name, "Array item paths are not part of the schema");
            continue;
        }
        let segments: Vec<&str> = param.name.split('.').collect();
        insert(&mut properties, &segments, leaf_schema(param));
    }

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "title": "Chart Values",
        "type": "object",
        "properties": properties,
    })
}

fn insert(properties: &mut Map<String, Json>, segments: &[&str], leaf: Json) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };
    if rest.is_empty() {
        let key = (*first).to_string();
        match properties.get_mut(&key) {
            // A parent documented after its children keeps their subtree.
            Some(Json::Object(existing)) if leaf.is_object() => {
                if let Json::Object(fields) = leaf {
                    existing.extend(fields);
                }
            }
            _ => {
                properties.insert(key, leaf);
            }
        }
        return;
    }

    let node = properties
        .entry((*first).to_string())
        .or_insert_with(|| json!({ "type": "object", "properties": {} }));
    if !node.get("properties").is_some_and(Json::is_object) {
        // A documented object that also has documented children.
        node["properties"] = json!({});
    }
    if let Some(children) = node.get_mut("properties").and_then(Json::as_object_mut) {
        insert(children, rest, leaf);
    }
}

fn leaf_schema(param: &Parameter) -> Json {
    let mut leaf = Map::new();
    if let Some(kind) = param.kind.and_then(json_type) {
        leaf.insert("type".into(), json!(kind));
    }
    leaf.insert("description".into(), json!(param.description));
    leaf.insert("default".into(), default_value(param));
    if param.nullable {
        leaf.insert("nullable".into(), json!(true));
    }
    if let Some(Value::Sequence(items)) = &param.value {
        if !items.is_empty() && items.iter().all(|item| matches!(item, Value::String(_))) {
            leaf.insert("items".into(), json!({ "type": "string" }));
        }
    }
    Json::Object(leaf)
}

fn json_type(kind: ValueKind) -> Option<&'static str> {
    match kind {
        ValueKind::Nil => None,
        other => Some(other.as_str()),
    }
}

fn default_value(param: &Parameter) -> Json {
    match (&param.value, param.kind) {
        (None, _) | (_, Some(ValueKind::Nil)) => Json::Null,
        (Some(value), _) => serde_json::to_value(value).unwrap_or(Json::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documented(name: &str, kind: ValueKind, value: Value) -> Parameter {
        let mut param = Parameter::new(name);
        param.kind = Some(kind);
        param.value = Some(value);
        param
    }

    #[test]
    fn test_nested_properties() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(documented("a.b.c", ValueKind::Number, Value::Number(1.into())), None);
        metadata.add_parameter(documented("a.d", ValueKind::Boolean, Value::Bool(true)), None);

        let schema = build_schema(&metadata);
        let a = &schema["properties"]["a"];
        assert_eq!(a["type"], "object");
        assert_eq!(a["properties"]["b"]["properties"]["c"]["type"], "number");
        assert_eq!(a["properties"]["d"]["default"], true);
    }

    #[test]
    fn test_excluded_parameters() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(Parameter::new("skipped").skipped(), None);
        let mut dotted = documented("ann.x.io/y", ValueKind::String, Value::String("v".into()));
        dotted.schema = false;
        metadata.add_parameter(dotted, None);
        metadata.add_parameter(
            documented("ports[0]", ValueKind::Number, Value::Number(80.into())),
            None,
        );

        let schema = build_schema(&metadata);
        assert_eq!(schema["properties"], json!({}));
    }

    #[test]
    fn test_nil_and_nullable() {
        let mut metadata = Metadata::default();
        let mut param = documented("sidecar", ValueKind::Nil, Value::String("nil".into()));
        param.nullable = true;
        metadata.add_parameter(param, None);

        let leaf = &build_schema(&metadata)["properties"]["sidecar"];
        assert!(leaf.get("type").is_none());
        assert_eq!(leaf["default"], Json::Null);
        assert_eq!(leaf["nullable"], true);
    }

    #[test]
    fn test_string_array_items() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(
            documented(
                "args",
                ValueKind::Array,
                Value::Sequence(vec![Value::String("--debug".into())]),
            ),
            None,
        );

        let leaf = &build_schema(&metadata)["properties"]["args"];
        assert_eq!(leaf["type"], "array");
        assert_eq!(leaf["items"]["type"], "string");
        assert_eq!(leaf["default"], json!(["--debug"]));
    }

    #[test]
    fn test_object_with_documented_children() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(
            documented("resources", ValueKind::Object, Value::Mapping(Default::default())),
            None,
        );
        metadata.add_parameter(
            documented("resources.limits", ValueKind::Object, Value::Mapping(Default::default())),
            None,
        );

        let schema = build_schema(&metadata);
        let resources = &schema["properties"]["resources"];
        assert_eq!(resources["type"], "object");
        assert_eq!(resources["properties"]["limits"]["type"], "object");
    }

    #[test]
    fn test_parent_documented_after_child_keeps_subtree() {
        let mut metadata = Metadata::default();
        metadata.add_parameter(
            documented("resources.limits", ValueKind::Object, Value::Mapping(Default::default())),
            None,
        );
        metadata.add_parameter(
            documented("resources", ValueKind::Object, Value::Mapping(Default::default()))
                .with_description("Container resources"),
            None,
        );

        let schema = build_schema(&metadata);
        let resources = &schema["properties"]["resources"];
        assert_eq!(resources["type"], "object");
        assert_eq!(resources["description"], "Container resources");
        assert_eq!(resources["default"], json!({}));
        assert_eq!(resources["properties"]["limits"]["type"], "object");
    }
}
