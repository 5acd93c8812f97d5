//! Tag regexes compiled from a [`ReadmeConfig`].

use chart_readme_core::{Error, ReadmeConfig, Result};
use regex::Regex;

/// Captures of a `@param`, `@skip` or `@extra` tag line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParameterTag<'l> {
    /// Path given in parentheses, e.g. `## @param (a.b) ...`.
    pub(crate) path: Option<&'l str>,
    /// Bare key label written after the keyword when no explicit path is given.
    pub(crate) label: Option<&'l str>,
    pub(crate) modifiers: Vec<&'l str>,
    pub(crate) description: &'l str,
}

/// The six tag patterns for one configuration.
///
/// Comment prefix and keywords are escaped before interpolation, so a
/// configuration such as `{"comments": {"format": "#*"}}` matches literally.
#[derive(Debug, Clone)]
pub(crate) struct TagPatterns {
    pub(crate) comment_prefix: String,
    param: Regex,
    section: Regex,
    skip: Regex,
    extra: Regex,
    description_start: Regex,
    description_content: Regex,
    description_end: Regex,
}

impl TagPatterns {
    pub(crate) fn new(config: &ReadmeConfig) -> Result<Self> {
        let comment = regex::escape(&config.comments.format);
        let tags = &config.tags;

        Ok(Self {
            comment_prefix: config.comments.format.clone(),
            param: compile(&parameter_pattern(&comment, &tags.param))?,
            section: compile(&trailing_text_pattern(&comment, &tags.section))?,
            skip: compile(&parameter_pattern(&comment, &tags.skip))?,
            extra: compile(&parameter_pattern(&comment, &tags.extra))?,
            description_start: compile(&trailing_text_pattern(
                &comment,
                &tags.description_start,
            ))?,
            description_content: compile(&format!(r"^\s*{comment}\s*(.*)$"))?,
            description_end: compile(&format!(
                r"^\s*{comment}\s*{}",
                keyword(&tags.description_end)
            ))?,
        })
    }

    pub(crate) fn param<'l>(&self, line: &'l str) -> Option<ParameterTag<'l>> {
        parameter_captures(&self.param, line)
    }

    pub(crate) fn skip<'l>(&self, line: &'l str) -> Option<ParameterTag<'l>> {
        parameter_captures(&self.skip, line)
    }

    pub(crate) fn extra<'l>(&self, line: &'l str) -> Option<ParameterTag<'l>> {
        parameter_captures(&self.extra, line)
    }

    /// Section name, trimmed.
    pub(crate) fn section<'l>(&self, line: &'l str) -> Option<&'l str> {
        trailing_text(&self.section, line)
    }

    /// Text following the start keyword, possibly empty.
    pub(crate) fn description_start<'l>(&self, line: &'l str) -> Option<&'l str> {
        trailing_text(&self.description_start, line)
    }

    /// Comment text with surrounding whitespace removed.
    pub(crate) fn description_content<'l>(&self, line: &'l str) -> Option<&'l str> {
        self.description_content
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim_end())
    }

    pub(crate) fn is_description_end(&self, line: &str) -> bool {
        self.description_end.is_match(line)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::InvalidPattern(e.to_string()))
}

/// Escapes a keyword and, when it ends in a word character, anchors it to a
/// word boundary so `@param` does not match `@parameters`.
fn keyword(tag: &str) -> String {
    let escaped = regex::escape(tag);
    if tag
        .chars()
        .last()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
    {
        format!(r"{escaped}\b")
    } else {
        escaped
    }
}

fn parameter_pattern(comment: &str, tag: &str) -> String {
    format!(
        r"^\s*{comment}\s*{}(?:\s*\(([^)]*)\)|\s+([^\s\[(]+))?\s*(\[[^\]]*\])?\s*(.*)$",
        keyword(tag)
    )
}

fn trailing_text_pattern(comment: &str, tag: &str) -> String {
    format!(r"^\s*{comment}\s*{}\s*(.*)$", keyword(tag))
}

fn trailing_text<'l>(regex: &Regex, line: &'l str) -> Option<&'l str> {
    regex
        .captures(line)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str().trim()))
}

fn parameter_captures<'l>(regex: &Regex, line: &'l str) -> Option<ParameterTag<'l>> {
    let caps = regex.captures(line)?;
    let path = caps
        .get(1)
        .map(|m| m.as_str().trim())
        .filter(|p| !p.is_empty());
    let label = caps.get(2).map(|m| m.as_str());
    let modifiers = caps
        .get(3)
        .map(|m| {
            m.as_str()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split(',')
                .collect()
        })
        .unwrap_or_default();
    let description = caps.get(4).map_or("", |m| m.as_str().trim());

    Some(ParameterTag {
        path,
        label,
        modifiers,
        description,
    })
}
