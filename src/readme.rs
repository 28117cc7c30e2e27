//! Keeps per-member calendar sections inside a README up to date.

use crate::error::{GrassError, Result};
use std::path::Path;

pub fn start_marker(key: &str) -> String {
    format!("<!-- GRASS_START_{key} -->")
}

pub fn end_marker(key: &str) -> String {
    format!("<!-- GRASS_END_{key} -->")
}

/// Replace the marked section for `key`, or append one when absent.
pub fn update_section(content: &str, key: &str, body: &str) -> Result<String> {
    let start = start_marker(key);
    let end = end_marker(key);
    let section = format!("{start}\n{body}\n{end}");

    let Some(begin) = content.find(&start) else {
        let mut out = content.trim_end().to_string();
        out.push_str("\n\n");
        out.push_str(&section);
        out.push('\n');
        return Ok(out);
    };

    let after_start = begin + start.len();
    let finish = content[after_start..]
        .find(&end)
        .map(|i| after_start + i + end.len())
        .ok_or_else(|| GrassError::Parse(format!("section for '{key}' has no closing marker")))?;

    Ok(format!("{}{}{}", &content[..begin], section, &content[finish..]))
}

/// Update `path` in place, creating it with a `# title` heading if missing.
pub fn update_readme(path: &Path, title: &str, sections: &[(String, String)]) -> Result<()> {
    let mut content = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        format!("# {title}\n")
    };

    for (key, body) in sections {
        content = update_section(&content, key, body)?;
    }

    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), sections = sections.len(), "README updated");
    Ok(())
}
