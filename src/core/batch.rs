use std::fs;
use std::io;
use std::path::Path;

/// Joins `\`-continued lines and drops blanks and `#` comments, including
/// comments between continued lines. Each entry carries the 1-based line
/// number where the logical line starts.
pub fn logical_lines(source: &str) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut started_at = 0;

    for (idx, line) in source.lines().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with('#') {
            continue;
        }

        if trimmed.is_empty() && current.is_empty() {
            continue;
        }

        if current.is_empty() {
            started_at = idx + 1;
        }

        if let Some(stripped) = trimmed.strip_suffix('\\') {
            current.push_str(stripped.trim());
            current.push(' ');
        } else {
            current.push_str(trimmed);
            let finished = current.trim().to_string();
            if !finished.is_empty() {
                lines.push((started_at, finished));
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        lines.push((started_at, rest.to_string()));
    }

    lines
}

pub fn read_timeline_file(path: &Path) -> Result<Vec<(usize, String)>, io::Error> {
    let source = fs::read_to_string(path)?;
    Ok(logical_lines(&source))
}
