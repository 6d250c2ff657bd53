//! INI-backed settings store with change tracking.
//!
//! Loads `[section]` / `key = value` files, resolves reads through the
//! `DEFAULT` section, and reports every write or removal to [`ChangeHooks`]
//! and an optional shared [`Observable`](crate::observer::Observable).

mod attributes;
mod hooks;
mod persistence;
mod snapshot;
mod store;

#[cfg(test)]
mod tests;

pub use attributes::split_attr_name;
pub use hooks::{ChangeHooks, NoHooks};
pub use snapshot::SectionDict;
pub use store::ConfigStore;
