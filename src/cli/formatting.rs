//! Formatting utilities for CLI output.

use crate::config_store::SectionDict;

/// ANSI color codes for terminal output
pub struct Colors;

impl Colors {
    /// Reset all formatting
    pub const RESET: &'static str = "\x1b[0m";
    /// Bold text
    pub const BOLD: &'static str = "\x1b[1m";
    /// Red color
    pub const RED: &'static str = "\x1b[31m";
}

/// Formats error messages with red styling
pub fn format_error(text: &str) -> String {
    format!("{}{}{}{}", Colors::BOLD, Colors::RED, text, Colors::RESET)
}

/// Renders section snapshots as INI-style text.
///
/// Multi-line values are indented under their key so the output can be
/// pasted back into a settings file.
///
/// # Examples
///
/// ```
/// use inistore::{SectionDict, cli::formatting::format_sections, ini::Section};
///
/// let mut items = Section::new();
/// items.insert("port".to_string(), "8080".to_string());
/// let dicts = vec![SectionDict { name: "server".into(), items }];
///
/// assert_eq!(format_sections(&dicts), "[server]\nport = 8080");
/// ```
pub fn format_sections(sections: &[SectionDict]) -> String {
    sections
        .iter()
        .map(|section| {
            let mut lines = vec![format!("[{}]", section.name)];
            lines.extend(
                section
                    .items
                    .iter()
                    .map(|(key, value)| format!("{key} = {}", value.replace('\n', "\n\t"))),
            );
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
