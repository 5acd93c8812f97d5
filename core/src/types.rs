//! Documentation model for annotated values files.
//!
//! This module defines the records produced by the two extraction passes. The
//! comment-tag scanner fills [`Metadata`] with documentation-only
//! [`Parameter`]s grouped into [`Section`]s; the value flattener produces
//! value-only [`Parameter`]s. The two sides are reconciled by
//! [`combine`](crate::combine) using [`Parameter::name`] as the key.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// Runtime type of a flattened value.
///
/// # Examples
///
/// ```
/// use chart_readme_core::ValueKind;
/// use serde_yaml::Value;
///
/// assert_eq!(ValueKind::of(&Value::Bool(true)), ValueKind::Boolean);
/// assert_eq!(ValueKind::of(&Value::Null), ValueKind::Nil);
/// assert_eq!(ValueKind::Object.to_string(), "object");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    /// YAML `null`, rendered with the Go-template spelling `nil`.
    Nil,
}

impl ValueKind {
    /// Classifies a YAML value. Tagged values are classified by their inner value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Nil,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Sequence(_) => Self::Array,
            Value::Mapping(_) => Self::Object,
            Value::Tagged(tagged) => Self::of(&tagged.value),
        }
    }

    /// Returns the lowercase tag used in reports and schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Nil => "nil",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One documented or observed configuration key.
///
/// Parameters coming from the scanner carry documentation (`description`,
/// `modifiers`, `section`) while parameters coming from the flattener carry
/// `kind`, `value` and `schema`. Both are keyed by [`name`](Parameter::name).
///
/// # Examples
///
/// ```
/// use chart_readme_core::Parameter;
///
/// let param = Parameter::new("image.tag")
///     .with_description("Image tag")
///     .with_modifiers(["string", "nullable", "string", " "]);
/// assert_eq!(param.name, "image.tag");
/// assert_eq!(param.modifiers, vec!["string", "nullable"]);
/// assert!(param.schema);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Dotted path, e.g. `a.b[0].c`.
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Tokens from a bracketed annotation such as `[array,nullable]`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
    /// Name of the enclosing section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub extra: bool,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ValueKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// False when the path could only be resolved by literal key matching.
    #[serde(default = "default_schema")]
    pub schema: bool,
    #[serde(default)]
    pub nullable: bool,
}

fn default_schema() -> bool {
    true
}

impl Parameter {
    /// Creates an undocumented parameter with the given dotted path.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            modifiers: Vec::new(),
            section: None,
            skip: false,
            extra: false,
            kind: None,
            value: None,
            schema: true,
            nullable: false,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the modifiers, trimming tokens and dropping empty or repeated ones.
    pub fn with_modifiers<I, S>(mut self, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.modifiers.clear();
        for modifier in modifiers {
            let token = modifier.as_ref().trim();
            if token.is_empty() || self.modifiers.iter().any(|m| m == token) {
                continue;
            }
            self.modifiers.push(token.to_string());
        }
        self
    }

    /// Marks the parameter as skipped.
    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    /// Marks the parameter as documentation-only and forces an empty value.
    pub fn extra(mut self) -> Self {
        self.extra = true;
        self.value = Some(Value::String(String::new()));
        self
    }

    /// Returns `true` when a value other than `""` or `null` is assigned.
    pub fn has_value(&self) -> bool {
        match &self.value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Returns `true` if `path` is this parameter's path or lies beneath it.
    ///
    /// # Examples
    ///
    /// ```
    /// use chart_readme_core::Parameter;
    ///
    /// let param = Parameter::new("image");
    /// assert!(param.covers("image"));
    /// assert!(param.covers("image.tag"));
    /// assert!(param.covers("image[0]"));
    /// assert!(!param.covers("imagePullSecrets"));
    /// ```
    pub fn covers(&self, path: &str) -> bool {
        match path.strip_prefix(self.name.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
            None => false,
        }
    }
}

/// Named grouping of parameters with an optional multi-line description.
///
/// A section does not own its parameters: [`parameters`](Section::parameters)
/// holds indices into [`Metadata::parameters`]. Use
/// [`Metadata::section_parameters`] to walk them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(default)]
    pub description: Vec<String>,
    /// Indices into [`Metadata::parameters`], in attachment order.
    #[serde(default)]
    pub parameters: Vec<usize>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Appends one description line.
    pub fn add_description_line(&mut self, line: impl Into<String>) {
        self.description.push(line.into());
    }

    /// Records the index of a parameter that belongs to this section.
    pub fn add_parameter(&mut self, index: usize) {
        self.parameters.push(index);
    }
}

/// Result of one comment-tag scan: every section and every resolved parameter.
///
/// # Examples
///
/// ```
/// use chart_readme_core::{Metadata, Parameter, Section};
///
/// let mut metadata = Metadata::default();
/// let section = metadata.add_section(Section::new("Common parameters"));
/// metadata.add_parameter(Parameter::new("nameOverride"), Some(section));
/// metadata.add_parameter(Parameter::new("loose"), None);
///
/// assert_eq!(metadata.parameters.len(), 2);
/// let names: Vec<_> = metadata
///     .section_parameters(&metadata.sections[0])
///     .map(|p| p.name.as_str())
///     .collect();
/// assert_eq!(names, vec!["nameOverride"]);
/// assert_eq!(metadata.parameters[0].section.as_deref(), Some("Common parameters"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub sections: Vec<Section>,
    pub parameters: Vec<Parameter>,
}

impl Metadata {
    /// Appends a section and returns its index.
    pub fn add_section(&mut self, section: Section) -> usize {
        self.sections.push(section);
        self.sections.len() - 1
    }

    /// Appends a parameter, attaching it to the section at `section` if given.
    ///
    /// Sets [`Parameter::section`] to the section's name. Returns the index of
    /// the parameter in [`Metadata::parameters`].
    pub fn add_parameter(&mut self, mut parameter: Parameter, section: Option<usize>) -> usize {
        let index = self.parameters.len();
        if let Some(owner) = section.and_then(|i| self.sections.get_mut(i)) {
            parameter.section = Some(owner.name.clone());
            owner.add_parameter(index);
        }
        self.parameters.push(parameter);
        index
    }

    /// Iterates the parameters grouped under `section`.
    pub fn section_parameters<'a>(
        &'a self,
        section: &'a Section,
    ) -> impl Iterator<Item = &'a Parameter> + 'a {
        section
            .parameters
            .iter()
            .filter_map(|&index| self.parameters.get(index))
    }

    /// Finds the first parameter with the given dotted path.
    pub fn find_parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_forces_empty_value() {
        let param = Parameter::new("docs.only").extra();
        assert!(param.extra);
        assert_eq!(param.value, Some(Value::String(String::new())));
        assert!(!param.has_value());
    }

    #[test]
    fn test_has_value_treats_null_and_empty_string_as_unset() {
        let mut param = Parameter::new("a");
        assert!(!param.has_value());
        param.value = Some(Value::Null);
        assert!(!param.has_value());
        param.value = Some(Value::Bool(false));
        assert!(param.has_value());
        param.value = Some(Value::Number(0.into()));
        assert!(param.has_value());
    }

    #[test]
    fn test_modifiers_keep_order_and_drop_duplicates() {
        let param = Parameter::new("a").with_modifiers(["array", "", "nullable", "array"]);
        assert_eq!(param.modifiers, vec!["array", "nullable"]);
    }

    #[test]
    fn test_add_parameter_without_section_leaves_sections_untouched() {
        let mut metadata = Metadata::default();
        metadata.add_section(Section::new("First"));
        metadata.add_parameter(Parameter::new("a"), None);

        assert!(metadata.sections[0].parameters.is_empty());
        assert!(metadata.parameters[0].section.is_none());
    }

    #[test]
    fn test_parameter_serializes_kind_as_type() {
        let mut param = Parameter::new("replicaCount");
        param.kind = Some(ValueKind::Number);
        param.value = Some(Value::Number(3.into()));

        let json = serde_json::to_value(&param).unwrap();
        assert_eq!(json["type"], "number");
        assert_eq!(json["value"], 3);
        assert!(json.get("modifiers").is_none());
    }
}
