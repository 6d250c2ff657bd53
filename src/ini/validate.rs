use crate::{Result, StoreError};

use super::parser::COMMENT_PREFIXES;

/// Checks that a setting can be written out and parsed back unchanged.
///
/// Section names must be non-empty and free of `]` and line breaks. Keys must
/// be non-empty, carry no surrounding whitespace, contain none of `=`, `:` or
/// a line break, and not start with a comment prefix or `[`. Each line of a
/// value must be free of surrounding whitespace, and the value must not end
/// with a line break.
///
/// # Errors
/// Returns `StoreError::UnwritableSetting` naming the first offending part.
pub fn check_entry(section: &str, key: &str, value: &str) -> Result<()> {
    let problem = section_problem(section)
        .or_else(|| key_problem(key))
        .or_else(|| value_problem(value));

    match problem {
        Some(details) => Err(StoreError::UnwritableSetting {
            section: section.to_string(),
            key: key.to_string(),
            details,
        }),
        None => Ok(()),
    }
}

fn section_problem(section: &str) -> Option<String> {
    if section.is_empty() {
        return Some("empty section name".to_string());
    }

    section
        .chars()
        .find(|c| matches!(c, ']' | '\n'))
        .map(|c| format!("section name contains {c:?}"))
}

fn key_problem(key: &str) -> Option<String> {
    let Some(first) = key.chars().next() else {
        return Some("empty key".to_string());
    };

    if key.trim() != key {
        return Some("key has surrounding whitespace".to_string());
    }
    if COMMENT_PREFIXES.contains(&first) || first == '[' {
        return Some(format!("key starts with {first:?}"));
    }

    key.chars()
        .find(|c| matches!(c, '=' | ':' | '\n'))
        .map(|c| format!("key contains {c:?}"))
}

fn value_problem(value: &str) -> Option<String> {
    if value.ends_with('\n') {
        return Some("value ends with a line break".to_string());
    }

    value
        .split('\n')
        .any(|line| line.trim() != line)
        .then(|| "value line has surrounding whitespace".to_string())
}
