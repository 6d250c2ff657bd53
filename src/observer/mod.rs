//! Change notification for settings stores.
//!
//! An [`Observable`] keeps an ordered list of [`Observer`]s, optionally
//! filtered by a `section.key` pattern, and calls them synchronously for every
//! [`ConfigChange`]. Async code can follow changes through
//! [`Observable::channel`].

mod changes;
mod hub;
mod path_ops;


pub use changes::{ConfigChange, ConfigEvent};
pub use hub::{Observable, Observer, ObserverError, SubscriptionId};
