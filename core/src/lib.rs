//! Core model for documenting annotated chart values files.
//!
//! This crate defines the records shared by the extraction passes and the
//! rules that reconcile them:
//!
//! - [`Parameter`]: one documented or observed key, identified by its dotted
//!   path (e.g. `image.tag`, `ingress.hosts[0].name`).
//! - [`Section`]: a named group of parameters with description lines.
//! - [`Metadata`]: every section and parameter found by one comment scan.
//! - [`ReadmeConfig`]: comment prefix, tag keywords, modifier names, and the
//!   README heading to update.
//!
//! [`combine`] copies observed types and values onto documented parameters,
//! [`check_keys`] reports keys that are undocumented or have no value, and
//! [`apply_modifiers`] resolves `[array]`/`[nullable]`/`[default: x]`
//! annotations before rendering.
//!
//! # Example
//!
//! ```
//! use chart_readme_core::*;
//! use serde_yaml::Value;
//!
//! let mut metadata = Metadata::default();
//! let common = metadata.add_section(Section::new("Common parameters"));
//! metadata.add_parameter(
//!     Parameter::new("nameOverride")
//!         .with_description("Override name")
//!         .with_modifiers(["default: \"\""]),
//!     Some(common),
//! );
//!
//! let mut observed = Parameter::new("nameOverride");
//! observed.kind = Some(ValueKind::String);
//! observed.value = Some(Value::String(String::new()));
//!
//! assert!(check_keys(&metadata, std::slice::from_ref(&observed)).is_empty());
//! combine(&mut metadata, &[observed]);
//! assert_eq!(metadata.parameters[0].kind, Some(ValueKind::String));
//! ```

mod check;
mod config;
mod error;
mod merge;
mod modifiers;
mod types;

pub use check::{CheckError, check_keys};
pub use config::{CommentsConfig, ModifiersConfig, ReadmeConfig, RegexpConfig, TagsConfig};
pub use error::{Error, Result};
pub use merge::combine;
pub use modifiers::apply_modifiers;
pub use types::*;
