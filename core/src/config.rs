//! Tag and rendering configuration.
//!
//! Defines the serializable configuration that tells the scanner which comment
//! prefix and tag keywords to recognize, which modifier names are understood,
//! and which README heading receives the generated table. Every field has a
//! default, so a configuration file only needs the keys it overrides.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "comments": { "format": "##" },
//!   "tags": {
//!     "param": "@param",
//!     "section": "@section",
//!     "descriptionStart": "@descriptionStart",
//!     "descriptionEnd": "@descriptionEnd",
//!     "skip": "@skip",
//!     "extra": "@extra"
//!   },
//!   "modifiers": {
//!     "array": "array",
//!     "object": "object",
//!     "string": "string",
//!     "nullable": "nullable",
//!     "default": "default"
//!   },
//!   "regexp": { "paramsSectionTitle": "Parameters" }
//! }
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Comment marker that introduces every tag line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentsConfig {
    /// Literal comment prefix, e.g. `##`.
    pub format: String,
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            format: "##".to_string(),
        }
    }
}

/// Keywords for the six tag kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TagsConfig {
    pub param: String,
    pub section: String,
    pub skip: String,
    pub extra: String,
    pub description_start: String,
    pub description_end: String,
}

impl Default for TagsConfig {
    fn default() -> Self {
        Self {
            param: "@param".to_string(),
            section: "@section".to_string(),
            skip: "@skip".to_string(),
            extra: "@extra".to_string(),
            description_start: "@descriptionStart".to_string(),
            description_end: "@descriptionEnd".to_string(),
        }
    }
}

/// Modifier names understood when preparing parameters for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifiersConfig {
    pub array: String,
    pub object: String,
    pub string: String,
    pub nullable: String,
    /// Prefix of the `default: <value>` modifier.
    pub default: String,
}

impl Default for ModifiersConfig {
    fn default() -> Self {
        Self {
            array: "array".to_string(),
            object: "object".to_string(),
            string: "string".to_string(),
            nullable: "nullable".to_string(),
            default: "default".to_string(),
        }
    }
}

/// Patterns used when editing the README.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegexpConfig {
    /// Title of the heading whose body is replaced by the parameter tables.
    pub params_section_title: String,
}

impl Default for RegexpConfig {
    fn default() -> Self {
        Self {
            params_section_title: "Parameters".to_string(),
        }
    }
}

/// Top-level generator configuration.
///
/// # Examples
///
/// ```
/// use chart_readme_core::ReadmeConfig;
///
/// let config = ReadmeConfig::default();
/// assert_eq!(config.comments.format, "##");
/// assert_eq!(config.tags.param, "@param");
/// assert_eq!(config.tags.description_start, "@descriptionStart");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadmeConfig {
    pub comments: CommentsConfig,
    pub tags: TagsConfig,
    pub modifiers: ModifiersConfig,
    pub regexp: RegexpConfig,
}

impl ReadmeConfig {
    /// Loads configuration from a `.json` file, or YAML for any other extension.
    ///
    /// Keys missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Io`](crate::Error::Io) if the file cannot be read, or
    /// [`Json`](crate::Error::Json) / [`Yaml`](crate::Error::Yaml) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_reader(reader)?
        } else {
            serde_yaml::from_reader(reader)?
        };
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_load_json_merges_with_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r##"{{"comments": {{"format": "#"}}, "tags": {{"descriptionStart": "@desc"}}}}"##
        )
        .unwrap();

        let config = ReadmeConfig::load(file.path()).unwrap();
        assert_eq!(config.comments.format, "#");
        assert_eq!(config.tags.description_start, "@desc");
        assert_eq!(config.tags.param, "@param");
        assert_eq!(config.regexp.params_section_title, "Parameters");
    }

    #[test]
    fn test_load_yaml_config() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "tags:\n  param: \"@value\"\nmodifiers:\n  nullable: optional").unwrap();

        let config = ReadmeConfig::load(file.path()).unwrap();
        assert_eq!(config.tags.param, "@value");
        assert_eq!(config.modifiers.nullable, "optional");
        assert_eq!(config.modifiers.array, "array");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = ReadmeConfig::load("/nonexistent/readme-config.json").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
