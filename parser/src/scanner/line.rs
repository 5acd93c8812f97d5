//! Structural line detection and indentation-driven path tracking.
//!
//! The scanner does not parse YAML. It only recognizes `key: value` lines and
//! their indentation, which is enough to know which dotted path the next
//! documented key lives at. Sequence items (`- name: x`) are not structural.

use std::sync::LazyLock;

use regex::Regex;

/// `indent` `key` `:` [`value`], where the key is bare or quoted.
static STRUCTURAL_LINE: LazyLock<Regex> = LazyLock::new(|| {
    // A compile-time constant; failure here is a programmer error.
    Regex::new(r#"^(\s*)("[^"]*"|'[^']*'|[^\s#:"'-][^:#]*?)\s*:(?:\s+(.*?))?\s*$"#)
        .expect("static regex must compile")
});

/// Inline values that still expect nested content below the key.
const EMPTY_INLINE_VALUES: [&str; 3] = ["", "{}", "[]"];

/// A `key: value` line as seen by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StructuralLine {
    pub(crate) indent: usize,
    pub(crate) key: String,
    /// Whether the line carries an inline scalar value.
    pub(crate) has_value: bool,
}

impl StructuralLine {
    /// Classifies `line`; lines starting with `comment_prefix` or `#` never match.
    pub(crate) fn parse(line: &str, comment_prefix: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#')
            || (!comment_prefix.is_empty() && trimmed.starts_with(comment_prefix))
        {
            return None;
        }

        let caps = STRUCTURAL_LINE.captures(line)?;
        let indent = caps.get(1).map_or(0, |m| m.as_str().chars().count());
        let raw_key = caps.get(2)?.as_str().trim();
        let key = unquote(raw_key);
        let value = caps.get(3).map_or("", |m| m.as_str().trim());
        let value = if value.starts_with('#') { "" } else { value };

        Some(Self {
            indent,
            key: key.to_string(),
            has_value: !EMPTY_INLINE_VALUES.contains(&value),
        })
    }
}

fn unquote(key: &str) -> &str {
    for quote in ['"', '\''] {
        if key.len() >= 2 && key.starts_with(quote) && key.ends_with(quote) {
            return &key[1..key.len() - 1];
        }
    }
    key
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PathFrame {
    indent: usize,
    key: String,
}

/// Keys currently in scope, each paired with the indentation it was seen at.
///
/// Indentations strictly increase from bottom to top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PathStack {
    frames: Vec<PathFrame>,
}

impl PathStack {
    /// Consumes a structural line: drops every frame at the same or deeper
    /// indentation, then pushes the line's key.
    pub(crate) fn enter(&mut self, line: &StructuralLine) {
        while self
            .frames
            .last()
            .is_some_and(|frame| frame.indent >= line.indent)
        {
            self.frames.pop();
        }
        self.frames.push(PathFrame {
            indent: line.indent,
            key: line.key.clone(),
        });
    }

    /// Dotted path of the keys in scope.
    pub(crate) fn current(&self) -> String {
        join(self.frames.iter().map(|frame| frame.key.as_str()))
    }

    /// Dotted path the stack would hold after [`enter`](Self::enter)ing `line`,
    /// without modifying the stack.
    pub(crate) fn projected(&self, line: &StructuralLine) -> String {
        let kept = self.frames.iter().take_while(|frame| frame.indent < line.indent);
        join(
            kept.map(|frame| frame.key.as_str())
                .chain(std::iter::once(line.key.as_str())),
        )
    }

    #[cfg(test)]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }
}

fn join<'a>(keys: impl Iterator<Item = &'a str>) -> String {
    keys.collect::<Vec<_>>().join(".")
}
