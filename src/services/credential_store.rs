//! Persisted, observable credential cell.
//!
//! A [`CredentialStore`] holds at most one credential. It is seeded from a
//! durable slot when loaded and writes every change straight back to that
//! slot before observers are notified, so memory and storage agree after
//! each [`set`](CredentialStore::set).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::{debug, error, info, warn};

use crate::domain::error::StoreError;
use crate::domain::models::BasicCredential;
use crate::domain::ports::{CredentialSource, SlotStorage};
use crate::services::codec::SlotCodec;

type Listener<V> = Arc<dyn Fn(Option<&V>) + Send + Sync>;

/// Current value stamped with the write that produced it
struct Versioned<V> {
    value: Option<V>,
    generation: u64,
}

struct Shared<C: SlotCodec> {
    storage: Arc<dyn SlotStorage>,
    slot: String,
    codec: C,
    value: Mutex<Versioned<C::Value>>,
    /// Newest generation whose notification has started
    published: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener<C::Value>)>>,
    next_listener: AtomicU64,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<C: SlotCodec> Shared<C> {
    fn persist(&self, value: Option<&C::Value>) -> Result<(), StoreError> {
        match value {
            Some(value) => {
                let encoded = self.codec.encode(value)?;
                self.storage.set_item(&self.slot, &encoded)?;
            }
            None => self.storage.remove_item(&self.slot)?,
        }
        Ok(())
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.published.load(Ordering::SeqCst) > generation
    }

    /// Deliver the value written as `generation` to every listener.
    ///
    /// Delivery stops as soon as a newer write has started notifying, so no
    /// listener receives a value after its successor.
    fn notify(&self, generation: u64, value: Option<&C::Value>) {
        if self.published.fetch_max(generation, Ordering::SeqCst) > generation {
            debug!(slot = %self.slot, generation, "skipping superseded notification");
            return;
        }

        // Listeners run unlocked so they may call back into the store.
        let listeners: Vec<Listener<C::Value>> = lock(&self.listeners)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            if self.is_superseded(generation) {
                debug!(slot = %self.slot, generation, "stopping superseded notification");
                return;
            }
            listener(value);
        }
    }

    fn register(&self, listener: Listener<C::Value>) -> u64 {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        lock(&self.listeners).push((id, listener));
        id
    }

    fn deregister(&self, id: u64) {
        lock(&self.listeners).retain(|(listener_id, _)| *listener_id != id);
    }
}

/// Persisted credential cell
///
/// Cloning yields another handle to the same cell.
pub struct CredentialStore<C: SlotCodec> {
    shared: Arc<Shared<C>>,
}

impl<C: SlotCodec> Clone for CredentialStore<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C: SlotCodec> CredentialStore<C> {
    /// Load the store from `slot` in `storage`.
    ///
    /// Never fails: an unreadable slot or an undecodable value is logged and
    /// the store starts empty. A value in a legacy encoding that the codec
    /// recognizes is migrated and written back in the current encoding.
    pub fn load(storage: Arc<dyn SlotStorage>, slot: impl Into<String>, codec: C) -> Self {
        let slot = slot.into();
        let initial = match storage.get_item(&slot) {
            Ok(None) => None,
            Ok(Some(raw)) => match codec.decode(&raw) {
                Ok(value) => value,
                Err(err) => match codec.migrate_legacy(&raw) {
                    Some(value) => {
                        match codec.encode(&value) {
                            Ok(encoded) => match storage.set_item(&slot, &encoded) {
                                Ok(()) => info!(slot = %slot, "migrated legacy credential"),
                                Err(err) => warn!(
                                    slot = %slot,
                                    error = %err,
                                    "failed to rewrite migrated credential"
                                ),
                            },
                            Err(err) => warn!(slot = %slot, error = %err, "failed to encode migrated credential"),
                        }
                        Some(value)
                    }
                    None => {
                        error!(slot = %slot, error = %err, "discarding undecodable credential");
                        None
                    }
                },
            },
            Err(err) => {
                error!(slot = %slot, error = %err, "failed to read credential slot");
                None
            }
        };

        debug!(slot = %slot, present = initial.is_some(), "credential store loaded");

        Self {
            shared: Arc::new(Shared {
                storage,
                slot,
                codec,
                value: Mutex::new(Versioned {
                    value: initial,
                    generation: 0,
                }),
                published: AtomicU64::new(0),
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
            }),
        }
    }

    /// Name of the durable slot backing this store
    pub fn slot(&self) -> &str {
        &self.shared.slot
    }

    /// Current credential
    pub fn get(&self) -> Option<C::Value> {
        lock(&self.shared.value).value.clone()
    }

    fn snapshot(&self) -> (u64, Option<C::Value>) {
        let current = lock(&self.shared.value);
        (current.generation, current.value.clone())
    }

    /// Replace the credential, persist it, then notify observers.
    ///
    /// `None` removes the slot entry. The in-memory value is replaced even if
    /// persisting fails; the failure is logged and returned.
    pub fn set(&self, value: Option<C::Value>) -> Result<(), StoreError> {
        self.write(|_| value)
    }

    /// Replace the credential with `f(current)`
    pub fn update<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(Option<C::Value>) -> Option<C::Value>,
    {
        self.write(f)
    }

    /// Remove the credential
    pub fn clear(&self) -> Result<(), StoreError> {
        self.set(None)
    }

    /// Register an observer and call it immediately with the current value
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Option<&C::Value>) + Send + Sync + 'static,
    {
        let listener: Listener<C::Value> = Arc::new(listener);
        let subscription = self.attach(Arc::clone(&listener));
        let (generation, current) = self.snapshot();
        // A write that already notified carries a newer value than ours.
        if !self.shared.is_superseded(generation) {
            listener(current.as_ref());
        }
        subscription
    }

    /// Register an observer for subsequent changes only
    pub fn on_change<F>(&self, listener: F) -> Subscription
    where
        F: Fn(Option<&C::Value>) + Send + Sync + 'static,
    {
        self.attach(Arc::new(listener))
    }

    fn attach(&self, listener: Listener<C::Value>) -> Subscription {
        let id = self.shared.register(listener);
        let shared: Weak<Shared<C>> = Arc::downgrade(&self.shared);
        Subscription {
            cancel: Some(Box::new(move || {
                if let Some(shared) = shared.upgrade() {
                    shared.deregister(id);
                }
            })),
        }
    }

    fn write<F>(&self, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(Option<C::Value>) -> Option<C::Value>,
    {
        // Persist under the value lock so concurrent writers cannot leave
        // memory and storage holding different credentials.
        let (generation, value, persisted) = {
            let mut current = lock(&self.shared.value);
            // Memory is only touched once `f` has returned.
            let next = f(current.value.clone());
            current.value = next.clone();
            current.generation += 1;
            let persisted = self.shared.persist(next.as_ref());
            (current.generation, next, persisted)
        };

        match &persisted {
            Ok(()) => debug!(
                slot = %self.shared.slot,
                present = value.is_some(),
                "credential updated"
            ),
            Err(err) => error!(
                slot = %self.shared.slot,
                error = %err,
                "failed to persist credential"
            ),
        }

        self.shared.notify(generation, value.as_ref());
        persisted
    }
}

impl<C: SlotCodec> fmt::Debug for CredentialStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("slot", &self.shared.slot)
            .field("present", &lock(&self.shared.value).value.is_some())
            .finish_non_exhaustive()
    }
}

impl<C> CredentialSource for CredentialStore<C>
where
    C: SlotCodec,
    C::Value: BasicCredential,
{
    fn basic_token(&self) -> Option<String> {
        lock(&self.shared.value)
            .value
            .as_ref()
            .map(BasicCredential::basic_token)
    }
}

/// Observer registration; dropping it (or calling
/// [`unsubscribe`](Self::unsubscribe)) stops notifications
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
