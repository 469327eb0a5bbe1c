//! Reader for git-config style credential files.
//!
//! Only the `[user] name` entry is ever needed, so this is a line scanner
//! rather than a full INI implementation. Section and key names compare
//! case-insensitively, `#` and `;` start comments, and a value may be
//! wrapped in double quotes. Subsections (`[user "work"]`) are not `[user]`.

use std::path::Path;

use crate::core::ToolkitError;

/// Read the `[user] name` value from the file at `path`.
///
/// Returns `Ok(None)` when the section or key is absent, or the value is empty.
///
/// # Errors
///
/// [`ToolkitError::CredentialFile`] when the file cannot be read or contains
/// a malformed section header.
pub fn read_user_name(path: &Path) -> Result<Option<String>, ToolkitError> {
    let content = std::fs::read_to_string(path).map_err(|e| ToolkitError::CredentialFile {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_user_name(&content).map_err(|reason| ToolkitError::CredentialFile {
        path: path.to_path_buf(),
        reason,
    })
}

fn parse_user_name(content: &str) -> Result<Option<String>, String> {
    let mut in_user_section = false;
    let mut name = None;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            let Some(header) = line.strip_prefix('[').and_then(|rest| rest.split_once(']')) else {
                return Err(format!("line {}: unterminated section header", index + 1));
            };
            in_user_section = header.0.trim().eq_ignore_ascii_case("user");
            continue;
        }

        if !in_user_section {
            continue;
        }

        let (key, value) = line.split_once('=').unwrap_or((line, ""));
        if key.trim().eq_ignore_ascii_case("name") {
            // Last assignment wins, as with git itself.
            name = Some(clean_value(value));
        }
    }

    Ok(name.filter(|n| !n.is_empty()))
}

fn clean_value(value: &str) -> String {
    let value = strip_comment(value).trim();
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .trim()
        .to_string()
}

fn strip_comment(value: &str) -> &str {
    let mut in_quotes = false;
    for (index, ch) in value.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' | ';' if !in_quotes => return &value[..index],
            _ => {}
        }
    }
    value
}
