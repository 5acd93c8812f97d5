//! Comment-tag scanner for annotated values files.
//!
//! The scanner reads the raw text once, top to bottom, with one line of
//! lookahead. It recognizes six tag kinds:
//!
//! - `@param`: documents a key, optionally with `(explicit.path)`,
//!   `[modifiers]` and a description
//! - `@section`: starts a new section
//! - `@descriptionStart` / `@descriptionEnd`: bracket section description
//!   lines; every comment line in between is captured
//! - `@skip`: records a key that is excluded from the output
//! - `@extra`: documents a key that has no backing value
//!
//! A tag without an explicit path is resolved from the YAML key that follows
//! it. If the very next line is a `key:` line, the path is resolved
//! immediately; otherwise the tag stays pending until the next `key:` line
//! anywhere below it.
//!
//! # Example
//!
//! ```
//! use chart_readme_core::ReadmeConfig;
//! use chart_readme_parser::scanner::CommentScanner;
//!
//! let text = concat!(
//!     "## @section Image parameters\n",
//!     "image:\n",
//!     "  ## @param image.tag [string] Image tag\n",
//!     "  tag: 1.0.0\n",
//!     "  ## @param (image.digest) Image digest\n",
//! );
//!
//! let scanner = CommentScanner::new(&ReadmeConfig::default()).unwrap();
//! let metadata = scanner.scan(text);
//! let names: Vec<_> = metadata.parameters.iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, vec!["image.tag", "image.digest"]);
//! assert_eq!(metadata.sections[0].parameters, vec![0, 1]);
//! ```

mod line;
mod patterns;

use chart_readme_core::{Metadata, Parameter, ReadmeConfig, Result, Section};
use tracing::{debug, trace};

use line::{PathStack, StructuralLine};
use patterns::{ParameterTag, TagPatterns};

/// Scanner bound to one configuration's compiled tag patterns.
#[derive(Debug, Clone)]
pub struct CommentScanner {
    patterns: TagPatterns,
}

impl CommentScanner {
    /// Compiles the tag patterns for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPattern`](chart_readme_core::Error::InvalidPattern) if
    /// a pattern built from the configured keywords does not compile.
    pub fn new(config: &ReadmeConfig) -> Result<Self> {
        Ok(Self {
            patterns: TagPatterns::new(config)?,
        })
    }

    /// Scans `text` and returns every section and resolved parameter.
    ///
    /// Scanning never fails: lines that match no tag are ignored.
    pub fn scan(&self, text: &str) -> Metadata {
        let lines: Vec<&str> = text.lines().collect();
        let mut state = ScanState::default();

        for (index, line) in lines.iter().enumerate() {
            state.step(&self.patterns, index + 1, line, lines.get(index + 1).copied());
        }

        state.finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Param,
    Skip,
    Extra,
}

impl TagKind {
    fn build(self, tag: &ParameterTag<'_>) -> Parameter {
        let param = Parameter::new(tag.path.unwrap_or_default()).with_description(tag.description);
        match self {
            Self::Param => param.with_modifiers(&tag.modifiers),
            Self::Skip => param.skipped(),
            Self::Extra => param.with_modifiers(&tag.modifiers).extra(),
        }
    }
}

/// A tag waiting for the `key:` line that names it.
#[derive(Debug, Clone)]
struct PendingParameter {
    parameter: Parameter,
    label: Option<String>,
    line: usize,
}

/// Everything the scan carries from one line to the next.
#[derive(Debug, Default)]
struct ScanState {
    metadata: Metadata,
    current_section: Option<usize>,
    capturing_description: bool,
    path: PathStack,
    pending: Option<PendingParameter>,
}

impl ScanState {
    fn step(&mut self, patterns: &TagPatterns, line_no: usize, line: &str, next: Option<&str>) {
        if let Some(structural) = StructuralLine::parse(line, &patterns.comment_prefix) {
            self.path.enter(&structural);
            trace!(
                line = line_no,
                path = %self.path.current(),
                inline_value = structural.has_value,
                "Entered key"
            );
            if let Some(pending) = self.pending.take() {
                let path = self.path.current();
                self.resolve(pending, path);
            }
        }

        if let Some(tag) = patterns.param(line) {
            self.on_parameter_tag(patterns, TagKind::Param, &tag, line_no, next);
        }

        if let Some(name) = patterns.section(line) {
            let index = self.metadata.add_section(Section::new(name));
            self.current_section = Some(index);
            self.capturing_description = false;
        }

        if self.current_section.is_some()
            && self.capturing_description
            && patterns.is_description_end(line)
        {
            self.capturing_description = false;
        }

        if self.capturing_description {
            if let Some(text) = patterns.description_content(line) {
                self.add_description_line(text);
            }
        }

        if !self.capturing_description && self.current_section.is_some() {
            if let Some(text) = patterns.description_start(line) {
                self.capturing_description = true;
                if !text.is_empty() {
                    self.add_description_line(text);
                }
            }
        }

        if let Some(tag) = patterns.skip(line) {
            self.on_parameter_tag(patterns, TagKind::Skip, &tag, line_no, next);
        }

        if let Some(tag) = patterns.extra(line) {
            self.on_parameter_tag(patterns, TagKind::Extra, &tag, line_no, next);
        }
    }

    fn on_parameter_tag(
        &mut self,
        patterns: &TagPatterns,
        kind: TagKind,
        tag: &ParameterTag<'_>,
        line_no: usize,
        next: Option<&str>,
    ) {
        let parameter = kind.build(tag);
        if tag.path.is_some() {
            self.attach(parameter);
            return;
        }

        let pending = PendingParameter {
            parameter,
            label: tag.label.map(str::to_string),
            line: line_no,
        };
        if let Some(dropped) = self.pending.replace(pending) {
            debug!(
                line = dropped.line,
                replaced_by = line_no,
                "Dropping unresolved tag"
            );
        }

        let Some(next_line) = next.and_then(|l| StructuralLine::parse(l, &patterns.comment_prefix))
        else {
            debug!(line = line_no, "Tag has no key on the next line; waiting");
            return;
        };
        if let Some(pending) = self.pending.take() {
            let path = self.path.projected(&next_line);
            self.resolve(pending, path);
        }
    }

    fn resolve(&mut self, pending: PendingParameter, path: String) {
        if let Some(label) = pending.label.as_deref() {
            let leaf = path.rsplit('.').next().unwrap_or_default();
            if label != path && label != leaf {
                debug!(
                    line = pending.line,
                    label,
                    path = %path,
                    "Tag label differs from the resolved key"
                );
            }
        }
        let mut parameter = pending.parameter;
        parameter.name = path;
        self.attach(parameter);
    }

    fn attach(&mut self, parameter: Parameter) {
        self.metadata.add_parameter(parameter, self.current_section);
    }

    fn add_description_line(&mut self, text: &str) {
        let section = self
            .current_section
            .and_then(|index| self.metadata.sections.get_mut(index));
        if let Some(section) = section {
            section.add_description_line(text);
        }
    }

    fn finish(self) -> Metadata {
        if let Some(pending) = &self.pending {
            debug!(line = pending.line, "Tag never resolved to a key; dropped");
        }
        debug!(
            sections = self.metadata.sections.len(),
            parameters = self.metadata.parameters.len(),
            "Scanned values comments"
        );
        self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Metadata {
        CommentScanner::new(&ReadmeConfig::default())
            .unwrap()
            .scan(text)
    }

    fn names(metadata: &Metadata) -> Vec<&str> {
        metadata.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_param_resolves_from_next_line() {
        let metadata = scan("## @param replicaCount Number of replicas\nreplicaCount: 3\n");

        assert_eq!(metadata.parameters.len(), 1);
        let param = &metadata.parameters[0];
        assert_eq!(param.name, "replicaCount");
        assert_eq!(param.description, "Number of replicas");
        assert!(param.kind.is_none());
        assert!(param.value.is_none());
        assert!(param.section.is_none());
    }

    #[test]
    fn test_dangling_param_is_dropped() {
        let metadata = scan("## @param image.tag Image tag");
        assert!(metadata.parameters.is_empty());
    }

    #[test]
    fn test_section_with_default_modifier() {
        let metadata = scan(
            "## @section Common parameters\n## @param nameOverride [default: \"\"] Override name\nnameOverride: \"\"\n",
        );

        assert_eq!(metadata.sections.len(), 1);
        let section = &metadata.sections[0];
        assert_eq!(section.name, "Common parameters");
        let params: Vec<_> = metadata.section_parameters(section).collect();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "nameOverride");
        assert_eq!(params[0].modifiers, vec!["default: \"\""]);
        assert_eq!(params[0].description, "Override name");
        assert_eq!(params[0].section.as_deref(), Some("Common parameters"));
    }

    #[test]
    fn test_explicit_path_is_verbatim() {
        let text = "\
image:
  ## @param (some.other.path) [array] Explicit
  tag: 1.0
";
        let metadata = scan(text);
        assert_eq!(names(&metadata), vec!["some.other.path"]);
        assert_eq!(metadata.parameters[0].modifiers, vec!["array"]);
    }

    #[test]
    fn test_nested_paths_follow_indentation() {
        let text = "\
## @param image.registry Registry
image:
  registry: docker.io
  ## @param image.tag Tag
  tag: 1.0
  pullPolicy:
    ## @param image.pullPolicy.mode Mode
    mode: Always
## @param replicaCount Replicas
replicaCount: 1
";
        let metadata = scan(text);
        assert_eq!(
            names(&metadata),
            vec!["image", "image.tag", "image.pullPolicy.mode", "replicaCount"]
        );
    }

    #[test]
    fn test_pending_resolves_against_later_key() {
        let text = "\
## @param service.port Port
## a plain comment in between

service:
  port: 80
";
        let metadata = scan(text);
        // The lookahead misses, so the first key line after the tag names it.
        assert_eq!(names(&metadata), vec!["service"]);
    }

    #[test]
    fn test_new_pending_tag_replaces_unresolved_one() {
        let text = "\
## @param first First
## @param second Second
a: 1
";
        let metadata = scan(text);
        assert_eq!(metadata.parameters.len(), 1);
        assert_eq!(metadata.parameters[0].name, "a");
        assert_eq!(metadata.parameters[0].description, "Second");
    }

    #[test]
    fn test_skip_and_extra_tags() {
        let text = "\
## @section Extras
## @skip extraDeploy
extraDeploy: []
## @extra (global.note) [string] Documented only
## @extra [object] Auto extra
podLabels: {}
";
        let metadata = scan(text);
        assert_eq!(
            names(&metadata),
            vec!["extraDeploy", "global.note", "podLabels"]
        );

        let skip = &metadata.parameters[0];
        assert!(skip.skip);
        assert!(skip.modifiers.is_empty());

        for extra in &metadata.parameters[1..] {
            assert!(extra.extra);
            assert_eq!(extra.value, Some(serde_yaml::Value::String(String::new())));
            assert_eq!(extra.section.as_deref(), Some("Extras"));
        }
        assert_eq!(metadata.parameters[2].modifiers, vec!["object"]);
    }

    #[test]
    fn test_section_description_block() {
        let text = "\
## @section Global parameters
## @descriptionStart First line
## Second line
##
##   Indented line
## @descriptionEnd
## Not part of the description
## @param global.imageRegistry Global registry
global:
  imageRegistry: \"\"
";
        let metadata = scan(text);
        let section = &metadata.sections[0];
        assert_eq!(
            section.description,
            vec!["First line", "Second line", "", "Indented line"]
        );
        assert_eq!(names(&metadata), vec!["global"]);
        // The lookahead saw `global:`; the nested key is never reached.
        assert_eq!(metadata.parameters[0].description, "Global registry");
    }

    #[test]
    fn test_description_start_without_text_adds_nothing() {
        let text = "\
## @section S
## @descriptionStart
## Body
## @descriptionEnd
";
        let metadata = scan(text);
        assert_eq!(metadata.sections[0].description, vec!["Body"]);
    }

    #[test]
    fn test_unterminated_description_stops_at_next_section() {
        let text = "\
## @section First
## @descriptionStart Opening line
## Still first
## @section Second
## Plain comment
## @descriptionStart Second text
## @descriptionEnd
";
        let metadata = scan(text);
        assert_eq!(
            metadata.sections[0].description,
            vec!["Opening line", "Still first"]
        );
        assert_eq!(metadata.sections[1].description, vec!["Second text"]);
    }

    #[test]
    fn test_description_tags_outside_section_are_ignored() {
        let text = "\
## @descriptionStart Orphan
## Body
## @descriptionEnd
## @section Later
";
        let metadata = scan(text);
        assert!(metadata.sections[0].description.is_empty());
    }

    #[test]
    fn test_new_section_ends_parameter_attachment() {
        let text = "\
## @section First
## @param a A
a: 1
## @section Second
## @param b B
b: 2
";
        let metadata = scan(text);
        assert_eq!(metadata.sections[0].parameters, vec![0]);
        assert_eq!(metadata.sections[1].parameters, vec![1]);
        assert_eq!(metadata.parameters[1].section.as_deref(), Some("Second"));
    }

    #[test]
    fn test_scan_is_idempotent() {
        let text = "\
## @section S
## @descriptionStart
## Text
## @descriptionEnd
## @param a [array] A
a: []
## @param (b.c) B
";
        let scanner = CommentScanner::new(&ReadmeConfig::default()).unwrap();
        assert_eq!(scanner.scan(text), scanner.scan(text));
    }

    #[test]
    fn test_empty_inline_value_still_nests() {
        let text = "\
podAnnotations: {}
## @param resources Resources
resources:
  ## @param resources.limits Limits
  limits: {}
";
        let metadata = scan(text);
        assert_eq!(names(&metadata), vec!["resources", "resources.limits"]);
    }
}
