use std::fmt::{self, Display, Formatter, Write};

use super::{DEFAULT_SECTION, IniDocument, Section};

impl Display for IniDocument {
    /// Renders the document as INI text: `[DEFAULT]` first when it has values,
    /// then every named section in order, each followed by a blank line.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if !self.defaults().is_empty() {
            write_section(f, DEFAULT_SECTION, self.defaults())?;
        }

        for (name, section) in self.sections() {
            write_section(f, name, section)?;
        }

        Ok(())
    }
}

fn write_section(out: &mut impl Write, name: &str, section: &Section) -> fmt::Result {
    writeln!(out, "[{name}]")?;

    for (key, value) in section {
        if value.is_empty() {
            writeln!(out, "{key} =")?;
        } else {
            writeln!(out, "{key} = {}", value.replace('\n', "\n\t"))?;
        }
    }

    writeln!(out)
}
