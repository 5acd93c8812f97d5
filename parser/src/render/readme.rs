//! Replacing the parameters section of a README.

use chart_readme_core::{Error, Result};

/// Replaces the body of the heading titled `title` with `tables`.
///
/// The body runs from the line after the heading to the next heading of the
/// same or a higher level, or to the end of the document. Headings inside
/// fenced code blocks are ignored.
///
/// # Errors
///
/// Returns [`Error::MissingParametersSection`] if no heading matches `title`.
///
/// # Examples
///
/// ```
/// use chart_readme_parser::render::insert_parameters;
///
/// let readme = "# Chart\n\n## Parameters\n\nold table\n\n## License\n";
/// let updated = insert_parameters(readme, "### Common\n", "Parameters").unwrap();
/// assert_eq!(updated, "# Chart\n\n## Parameters\n\n### Common\n\n## License\n");
/// ```
pub fn insert_parameters(readme: &str, tables: &str, title: &str) -> Result<String> {
    let lines: Vec<&str> = readme.lines().collect();
    let headings = headings(&lines);

    let (start, level) = headings
        .iter()
        .copied()
        .find(|&(index, _)| heading_title(lines[index]) == Some(title))
        .ok_or_else(|| Error::MissingParametersSection(title.to_string()))?;
    let end = headings
        .iter()
        .find(|&&(index, other)| index > start && other <= level)
        .map_or(lines.len(), |&(index, _)| index);

    let mut out = String::with_capacity(readme.len() + tables.len());
    for line in &lines[..=start] {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(tables.trim_end());
    out.push('\n');
    if end < lines.len() {
        out.push('\n');
        for line in &lines[end..] {
            out.push_str(line);
            out.push('\n');
        }
    }
    Ok(out)
}

/// `(line index, level)` of every ATX heading outside code fences.
fn headings(lines: &[&str]) -> Vec<(usize, usize)> {
    let mut in_fence = false;
    let mut found = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if let Some(level) = heading_level(line) {
            found.push((index, level));
        }
    }
    found
}

fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|&c| c == '#').count();
    let rest = &line[level..];
    ((1..=6).contains(&level) && (rest.is_empty() || rest.starts_with(' '))).then_some(level)
}

fn heading_title(line: &str) -> Option<&str> {
    let level = heading_level(line)?;
    Some(line[level..].trim().trim_end_matches('#').trim_end())
}
