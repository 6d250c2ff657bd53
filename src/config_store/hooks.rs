/// Reactions that run inside the store on every successful mutation.
///
/// Hooks run after the in-memory update and before observers are notified.
/// Both methods default to doing nothing, so implementors override only what
/// they need.
///
/// ```rust
/// use inistore::config_store::{ChangeHooks, ConfigStore};
///
/// struct PortGuard;
///
/// impl ChangeHooks for PortGuard {
///     fn on_change(&mut self, section: &str, key: &str, value: &str) {
///         if section == "server" && key == "port" {
///             println!("restart needed, port is now {value}");
///         }
///     }
/// }
///
/// let store = ConfigStore::new("app.ini").with_hooks(PortGuard);
/// ```
pub trait ChangeHooks: Send {
    /// A value was written.
    fn on_change(&mut self, _section: &str, _key: &str, _value: &str) {}

    /// A key was removed, or the whole section when `key` is `None`.
    fn on_remove(&mut self, _section: &str, _key: Option<&str>) {}
}

/// Hooks that do nothing. Used when none are supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl ChangeHooks for NoHooks {}
