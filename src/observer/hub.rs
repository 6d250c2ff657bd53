use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    sync::{
        Arc, PoisonError, RwLock,
        atomic::{AtomicUsize, Ordering},
    },
};

use tokio::sync::broadcast::{self, Receiver, Sender};
use tracing::{debug, warn};

use super::{
    ConfigChange,
    path_ops::{path_matches, section_matches},
};

const MATCH_ALL: &str = "*";

/// Errors an observer can report back to the code that triggered a change.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// The observer refused the change.
    #[error("{0}")]
    Rejected(String),

    /// Any other failure inside the observer.
    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync>),
}

/// Receives settings changes.
///
/// Closures of the shape `Fn(&ConfigChange) -> Result<(), ObserverError>`
/// implement this trait directly.
pub trait Observer: Send + Sync {
    /// Called synchronously after a change has been applied.
    ///
    /// # Errors
    /// An error stops delivery to the remaining observers and is returned
    /// from the mutating store call.
    fn notify(&self, change: &ConfigChange) -> Result<(), ObserverError>;
}

impl<F> Observer for F
where
    F: Fn(&ConfigChange) -> Result<(), ObserverError> + Send + Sync,
{
    fn notify(&self, change: &ConfigChange) -> Result<(), ObserverError> {
        self(change)
    }
}

/// Handle returned by subscription calls, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

impl Display for SubscriptionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Subscription {
    id: SubscriptionId,
    pattern: String,
    observer: Arc<dyn Observer>,
}

/// Notification hub shared between a store and whoever wants to hear about its changes.
///
/// The hub is handed to stores as `Arc<Observable>`; its owner keeps
/// registering and removing observers while stores hold on to it. Delivery is
/// synchronous and follows registration order.
pub struct Observable {
    subscriptions: RwLock<Vec<Subscription>>,
    next_id: AtomicUsize,
}

impl Observable {
    /// Creates a hub with no observers.
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(Vec::new()),
            next_id: AtomicUsize::new(1),
        }
    }

    /// Registers an observer for every change.
    pub fn subscribe(&self, observer: impl Observer + 'static) -> SubscriptionId {
        self.subscribe_to(MATCH_ALL, observer)
    }

    /// Registers an observer for changes whose `section.key` path matches `pattern`.
    ///
    /// Patterns are dot-separated with `*` matching one segment, e.g.
    /// `"server.*"` or `"*.port"`. Removing a whole section reaches every
    /// pattern that would match one of its keys.
    pub fn subscribe_to(
        &self,
        pattern: &str,
        observer: impl Observer + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));

        self.subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Subscription {
                id,
                pattern: pattern.to_string(),
                observer: Arc::new(observer),
            });

        debug!(subscription = %id, pattern, "observer registered");
        id
    }

    /// Forwards matching changes into a broadcast channel for async consumers.
    ///
    /// Sending never fails the triggering change: once every receiver is
    /// dropped, changes are discarded until the subscription is removed.
    pub fn channel(
        &self,
        pattern: &str,
        capacity: usize,
    ) -> (SubscriptionId, Receiver<ConfigChange>) {
        let (sender, receiver) = broadcast::channel(capacity.max(1));
        let id = self.subscribe_to(pattern, ChannelObserver { sender });

        (id, receiver)
    }

    /// Removes an observer. Returns `false` if the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let before = subscriptions.len();
        subscriptions.retain(|sub| sub.id != id);
        before != subscriptions.len()
    }

    /// Number of registered observers.
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Delivers a change to every matching observer, in registration order.
    ///
    /// Observers are called outside the internal lock, so they may subscribe
    /// or unsubscribe while being notified.
    ///
    /// # Errors
    /// Returns the first observer error; later observers are not called.
    pub fn notify(&self, change: &ConfigChange) -> Result<(), ObserverError> {
        let path = change.path();
        let targets: Vec<(SubscriptionId, Arc<dyn Observer>)> = self
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|sub| match change.key {
                Some(_) => path_matches(&path, &sub.pattern),
                None => section_matches(&path, &sub.pattern),
            })
            .map(|sub| (sub.id, Arc::clone(&sub.observer)))
            .collect();

        for (id, observer) in targets {
            if let Err(e) = observer.notify(change) {
                warn!(
                    subscription = %id,
                    event = %change.event,
                    path = %path,
                    error = %e,
                    "observer failed"
                );
                return Err(e);
            }
        }

        Ok(())
    }
}

impl Default for Observable {
    fn default() -> Self {
        Self::new()
    }
}

struct ChannelObserver {
    sender: Sender<ConfigChange>,
}

impl Observer for ChannelObserver {
    fn notify(&self, change: &ConfigChange) -> Result<(), ObserverError> {
        let _ = self.sender.send(change.clone());
        Ok(())
    }
}
