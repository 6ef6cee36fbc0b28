//! Scoped observer registry.
//!
//! `watch` hands back a [`Subscription`]; the observer stays registered until
//! that guard is dropped or explicitly unsubscribed. A registry that is
//! dropped first simply makes the guard's teardown a no-op.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Callback<S, E> = dyn Fn(&mut S, &E) + Send + Sync;

struct Observers<S, E> {
    next_id: u64,
    entries: Vec<(u64, Arc<Callback<S, E>>)>,
}

pub struct WatchRegistry<S, E> {
    observers: Arc<Mutex<Observers<S, E>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: 'static, E: 'static> WatchRegistry<S, E> {
    pub fn new() -> Self {
        Self {
            observers: Arc::new(Mutex::new(Observers {
                next_id: 0,
                entries: Vec::new(),
            })),
        }
    }

    pub fn watch<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&mut S, &E) + Send + Sync + 'static,
    {
        let id = {
            let mut observers = lock(&self.observers);
            let id = observers.next_id;
            observers.next_id += 1;
            observers.entries.push((id, Arc::new(callback)));
            id
        };

        let registry = Arc::downgrade(&self.observers);
        Subscription::new(move || {
            if let Some(observers) = registry.upgrade() {
                lock(&observers)
                    .entries
                    .retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Run every registered observer against `state`. The registry lock is
    /// released before callbacks run, so observers may register or drop
    /// subscriptions themselves.
    pub fn notify(&self, state: &mut S, event: &E) {
        let callbacks: Vec<Arc<Callback<S, E>>> = lock(&self.observers)
            .entries
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in callbacks {
            callback(state, event);
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.observers).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: 'static, E: 'static> Default for WatchRegistry<S, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration guard returned by [`WatchRegistry::watch`].
#[must_use = "dropping a subscription unregisters the observer immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(teardown: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    pub fn unsubscribe(mut self) {
        self.run_teardown();
    }

    fn run_teardown(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.run_teardown();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.teardown.is_some())
            .finish()
    }
}
