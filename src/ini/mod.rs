//! INI document model, parser and writer.
//!
//! The dialect is the familiar one:
//!
//! ```text
//! [DEFAULT]
//! compression = yes
//!
//! [server]
//! port = 8080
//! motd = first line
//!     second line
//!
//! ; comment
//! # also a comment
//! ```
//!
//! `key = value` and `key : value` are both accepted, lines indented deeper
//! than their key continue the previous value, and `[DEFAULT]` holds the
//! fallback layer shared by every section. Section and key names keep their
//! case. Values are plain strings; no interpolation is performed.
//!
//! Not every string survives that format. [`check_entry`] rejects settings
//! that would be read back differently from how they were written.

mod document;
mod parser;
mod validate;
mod writer;


pub use document::{DEFAULT_SECTION, IniDocument, Section};
pub use validate::check_entry;
