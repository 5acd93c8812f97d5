//! Rendering modifiers such as `[array]`, `[nullable]` or `[default: 8080]`.

use serde_yaml::{Mapping, Value};

use crate::config::ModifiersConfig;
use crate::error::{Error, Result};
use crate::{Parameter, ValueKind};

/// Applies the parameter's modifiers to its kind and value.
///
/// The `nullable` modifier may appear anywhere and only sets
/// [`Parameter::nullable`]. Of the remaining modifiers the last one decides
/// the rendered value: `array` → `[]`, `object` → `{}`, `string` → `""`,
/// `default: <yaml>` → the parsed scalar (raw text if it is not valid YAML).
///
/// # Errors
///
/// Returns [`Error::UnknownModifier`] for any other token.
///
/// # Examples
///
/// ```
/// use chart_readme_core::*;
/// use serde_yaml::Value;
///
/// let mut param = Parameter::new("port").with_modifiers(["nullable", "default: 8080"]);
/// apply_modifiers(&mut param, &ModifiersConfig::default()).unwrap();
/// assert!(param.nullable);
/// assert_eq!(param.value, Some(Value::Number(8080.into())));
/// ```
pub fn apply_modifiers(param: &mut Parameter, config: &ModifiersConfig) -> Result<()> {
    let mut remaining = Vec::with_capacity(param.modifiers.len());
    for modifier in &param.modifiers {
        if *modifier == config.nullable {
            param.nullable = true;
        } else {
            remaining.push(modifier.as_str());
        }
    }

    let Some(last) = remaining.last() else {
        return Ok(());
    };

    if *last == config.array {
        param.kind = Some(ValueKind::Array);
        param.value = Some(Value::Sequence(Vec::new()));
    } else if *last == config.object {
        param.kind = Some(ValueKind::Object);
        param.value = Some(Value::Mapping(Mapping::new()));
    } else if *last == config.string {
        param.kind = Some(ValueKind::String);
        param.value = Some(Value::String(String::new()));
    } else if let Some(text) = default_text(last, &config.default) {
        let value = serde_yaml::from_str::<Value>(text)
            .ok()
            .filter(|v| !matches!(v, Value::Mapping(_) | Value::Sequence(_)))
            .unwrap_or_else(|| Value::String(text.to_string()));
        param.value = Some(value);
    } else {
        return Err(Error::UnknownModifier {
            modifier: (*last).to_string(),
            parameter: param.name.clone(),
        });
    }

    Ok(())
}

fn default_text<'a>(modifier: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = modifier.strip_prefix(keyword)?;
    let rest = rest.trim_start();
    rest.strip_prefix(':').map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(modifiers: &[&str]) -> Result<Parameter> {
        let mut param = Parameter::new("p").with_modifiers(modifiers.iter().copied());
        param.kind = Some(ValueKind::Nil);
        param.value = Some(Value::String("nil".into()));
        apply_modifiers(&mut param, &ModifiersConfig::default())?;
        Ok(param)
    }

    #[test]
    fn test_array_modifier() {
        let param = apply(&["array"]).unwrap();
        assert_eq!(param.kind, Some(ValueKind::Array));
        assert_eq!(param.value, Some(Value::Sequence(Vec::new())));
        assert!(!param.nullable);
    }

    #[test]
    fn test_last_modifier_wins() {
        let param = apply(&["array", "object"]).unwrap();
        assert_eq!(param.kind, Some(ValueKind::Object));
        assert_eq!(param.value, Some(Value::Mapping(Mapping::new())));
    }

    #[test]
    fn test_nullable_string() {
        let param = apply(&["string", "nullable"]).unwrap();
        assert!(param.nullable);
        assert_eq!(param.kind, Some(ValueKind::String));
        assert_eq!(param.value, Some(Value::String(String::new())));
    }

    #[test]
    fn test_default_with_quoted_empty_string() {
        let param = apply(&["default: \"\""]).unwrap();
        assert_eq!(param.value, Some(Value::String(String::new())));
        assert_eq!(param.kind, Some(ValueKind::Nil));
    }

    #[test]
    fn test_default_keeps_unparsable_text() {
        let param = apply(&["default: {{ .Release.Name }}"]).unwrap();
        assert_eq!(
            param.value,
            Some(Value::String("{{ .Release.Name }}".into()))
        );
    }

    #[test]
    fn test_unknown_modifier_is_rejected() {
        let err = apply(&["bogus"]).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownModifier { ref modifier, ref parameter }
                if modifier == "bogus" && parameter == "p"
        ));
    }

    #[test]
    fn test_only_nullable_keeps_value() {
        let param = apply(&["nullable"]).unwrap();
        assert!(param.nullable);
        assert_eq!(param.value, Some(Value::String("nil".into())));
    }
}
