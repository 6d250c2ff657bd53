use std::{path::Path, sync::LazyLock};

use regex::Regex;

use crate::{Result, StoreError};

use super::{DEFAULT_SECTION, IniDocument};

#[allow(clippy::expect_used)]
static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(?P<header>[^\]]+)\]$").expect("section header pattern must compile")
});

#[allow(clippy::expect_used)]
static OPTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<key>[^=:]*?)\s*[=:]\s*(?P<value>.*)$")
        .expect("option line pattern must compile")
});

pub(super) const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

/// Parses INI text into a document.
///
/// # Errors
/// Returns `StoreError::IniParse` for the first line that breaks the format:
/// an option before any section header, a line that is neither header nor
/// option, a repeated section header, a repeated key or an empty key.
pub(super) fn parse_document(content: &str, origin: Option<&Path>) -> Result<IniDocument> {
    let mut parser = Parser::new(origin);

    for (index, raw) in content.lines().enumerate() {
        parser.feed(index + 1, raw)?;
    }

    Ok(parser.finish())
}

/// A value still open for continuation lines.
struct PendingValue {
    key: String,
    indent: usize,
    lines: Vec<String>,
}

struct Parser<'a> {
    origin: Option<&'a Path>,
    document: IniDocument,
    current: Option<String>,
    seen_default: bool,
    pending: Option<PendingValue>,
}

impl<'a> Parser<'a> {
    fn new(origin: Option<&'a Path>) -> Self {
        Self {
            origin,
            document: IniDocument::new(),
            current: None,
            seen_default: false,
            pending: None,
        }
    }

    fn feed(&mut self, line: usize, raw: &str) -> Result<()> {
        let trimmed = raw.trim();
        let indent = raw.len() - raw.trim_start().len();

        if trimmed.is_empty() {
            if let Some(pending) = self.pending.as_mut() {
                pending.lines.push(String::new());
            }
            return Ok(());
        }

        if let Some(pending) = self.pending.as_mut()
            && indent > pending.indent
        {
            pending.lines.push(trimmed.to_string());
            return Ok(());
        }

        if trimmed.starts_with(COMMENT_PREFIXES) {
            return Ok(());
        }

        self.flush();

        if let Some(captures) = SECTION_HEADER.captures(trimmed) {
            return self.open_section(&captures["header"], line);
        }

        self.open_value(trimmed, indent, line)
    }

    fn open_section(&mut self, name: &str, line: usize) -> Result<()> {
        let duplicate = if name == DEFAULT_SECTION {
            std::mem::replace(&mut self.seen_default, true)
        } else {
            !self.document.add_section(name)
        };

        if duplicate {
            return Err(self.error(format!("duplicate section [{name}]"), line));
        }

        self.current = Some(name.to_string());
        Ok(())
    }

    fn open_value(&mut self, trimmed: &str, indent: usize, line: usize) -> Result<()> {
        let Some(section) = self.current.as_deref() else {
            return Err(self.error(
                format!("missing section header before '{trimmed}'"),
                line,
            ));
        };

        let Some(captures) = OPTION_LINE.captures(trimmed) else {
            return Err(self.error(
                format!("expected '[section]' or 'key = value', found '{trimmed}'"),
                line,
            ));
        };

        let key = captures["key"].trim();
        if key.is_empty() {
            return Err(self.error("empty key", line));
        }

        let exists = self
            .document
            .section(section)
            .is_some_and(|values| values.contains_key(key));
        if exists {
            let details = format!("duplicate key '{key}' in section [{section}]");
            return Err(self.error(details, line));
        }

        self.pending = Some(PendingValue {
            key: key.to_string(),
            indent,
            lines: vec![captures["value"].trim().to_string()],
        });

        Ok(())
    }

    fn flush(&mut self) {
        let (Some(mut pending), Some(section)) = (self.pending.take(), self.current.as_deref())
        else {
            return;
        };

        while pending.lines.len() > 1 && pending.lines.last().is_some_and(String::is_empty) {
            pending.lines.pop();
        }

        self.document
            .section_entry(section)
            .insert(pending.key, pending.lines.join("\n"));
    }

    fn finish(mut self) -> IniDocument {
        self.flush();
        self.document
    }

    fn error(&self, details: impl Into<String>, line: usize) -> StoreError {
        StoreError::ini_parse(details.into(), line, self.origin)
    }
}
