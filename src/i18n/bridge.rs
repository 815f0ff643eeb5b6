//! Propagation bridge: fan-out of language changes to live observers.
//!
//! Pages and components register a handler when they mount and hold the
//! returned [`Subscription`]; dropping it deregisters the handler, so a dead
//! instance can never be notified.
//!
//! Fan-out runs in two phases. Chrome observers (tab bar labels and similar)
//! are notified first, then consumer observers, each in registration order.
//! The live handler list is copied before invoking anything and every handler
//! is re-checked just before its call, so a handler may subscribe or drop
//! other subscriptions while a fan-out is in progress.

use crate::i18n::Translator;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, TryLockError, Weak};
use tracing::debug;

type Handler = Box<dyn FnMut(&Translator<'_>) + Send>;
type SharedHandler = Arc<Mutex<Handler>>;

/// Fan-out phase an observer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Standalone host chrome, refreshed before any page
    Chrome,
    /// Pages and components holding a snapshot
    Consumer,
}

struct Entry {
    id: u64,
    phase: Phase,
    handler: SharedHandler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

fn lock_registry(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Observer registry shared by the controller and its subscriptions.
#[derive(Clone, Default)]
pub struct PropagationBridge {
    registry: Arc<Mutex<Registry>>,
}

impl PropagationBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `phase`.
    pub fn subscribe<F>(&self, phase: Phase, handler: F) -> Subscription
    where
        F: FnMut(&Translator<'_>) + Send + 'static,
    {
        let mut registry = lock_registry(&self.registry);
        registry.next_id += 1;
        let id = registry.next_id;
        registry.entries.push(Entry {
            id,
            phase,
            handler: Arc::new(Mutex::new(Box::new(handler))),
        });
        debug!("Registered {:?} observer #{}", phase, id);

        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Invoke every live handler with `translator`.
    ///
    /// Returns how many handlers ran.
    pub fn notify(&self, translator: &Translator<'_>) -> usize {
        let registry = lock_registry(&self.registry);
        let mut pending: Vec<(u64, SharedHandler)> = Vec::with_capacity(registry.entries.len());
        for phase in [Phase::Chrome, Phase::Consumer] {
            pending.extend(
                registry
                    .entries
                    .iter()
                    .filter(|entry| entry.phase == phase)
                    .map(|entry| (entry.id, Arc::clone(&entry.handler))),
            );
        }
        drop(registry);

        let mut notified = 0;
        for (id, handler) in pending {
            if !self.is_registered(id) {
                debug!("Observer #{} deregistered during fan-out, skipping", id);
                continue;
            }

            let mut handler = match handler.try_lock() {
                Ok(guard) => guard,
                Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
                Err(TryLockError::WouldBlock) => {
                    debug!("Observer #{} is already running, skipping re-entrant call", id);
                    continue;
                }
            };
            (*handler)(translator);
            notified += 1;
        }

        debug!(
            "Fan-out for {} reached {} observers",
            translator.language(),
            notified
        );
        notified
    }

    fn is_registered(&self, id: u64) -> bool {
        lock_registry(&self.registry)
            .entries
            .iter()
            .any(|entry| entry.id == id)
    }

    /// Number of registered observers in `phase`.
    pub fn count(&self, phase: Phase) -> usize {
        lock_registry(&self.registry)
            .entries
            .iter()
            .filter(|entry| entry.phase == phase)
            .count()
    }

    pub fn len(&self) -> usize {
        lock_registry(&self.registry).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for PropagationBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropagationBridge")
            .field("chrome", &self.count(Phase::Chrome))
            .field("consumers", &self.count(Phase::Consumer))
            .finish()
    }
}

/// Registration handle. Dropping it deregisters the observer.
#[must_use = "dropping a Subscription deregisters the observer immediately"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Whether the observer is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| {
                lock_registry(&registry)
                    .entries
                    .iter()
                    .any(|entry| entry.id == self.id)
            })
            .unwrap_or(false)
    }

    /// Deregister now. Same as dropping the subscription.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = lock_registry(&registry);
            registry.entries.retain(|entry| entry.id != self.id);
            debug!("Deregistered observer #{}", self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
