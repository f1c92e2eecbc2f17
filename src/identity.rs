use crate::models::AuthState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use uuid::Uuid;

// --- Identity Provider Contract ---

/// Callback invoked by an identity provider whenever the authenticated actor
/// changes: `Some(actor_id)` on sign-in, `None` on sign-out. Shared ownership
/// so a provider can notify without consuming the subscription.
pub type IdentityCallback = Arc<dyn Fn(Option<Uuid>) + Send + Sync>;

/// Opaque handle identifying one live subscription with its provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Wraps a provider-chosen raw id. Only the issuing provider should ever
    /// interpret the value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn into_raw(self) -> u64 {
        self.0
    }
}

/// IdentityProvider
///
/// Contract for the external authentication collaborator. A provider fires
/// each subscription's callback at least once (synchronously during
/// `subscribe` or asynchronously afterwards) with the current actor, and
/// again on every subsequent sign-in/sign-out. `unsubscribe` must be safe to
/// call with an already-removed handle.
pub trait IdentityProvider: Send + Sync {
    fn subscribe(&self, callback: IdentityCallback) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

/// The shared handle type used to inject the provider into the shell.
pub type IdentityProviderState = Arc<dyn IdentityProvider>;

// --- One-Shot Resolution ---

/// IdentityResolver
///
/// Adapts the provider's continuous subscription into a one-shot answer to
/// "who is authenticated right now, for this navigation?". Each call opens a
/// fresh subscription, takes the first delivered value, and unsubscribes
/// immediately so navigations never leak listeners.
pub struct IdentityResolver {
    provider: IdentityProviderState,
}

impl IdentityResolver {
    pub fn new(provider: IdentityProviderState) -> Self {
        Self { provider }
    }

    /// resolve
    ///
    /// Resolves the authentication state at the moment of this navigation.
    ///
    /// The first delivery is captured through a one-shot channel whose sender
    /// sits behind a `take`-once slot: a provider that fires synchronously
    /// during `subscribe`, or fires multiple times before we unsubscribe,
    /// still results in exactly one delivered value. The subscription is
    /// cancelled exactly once, after the value arrives.
    ///
    /// A provider that drops the callback without ever firing violates its
    /// at-least-once contract; rather than hang the navigation forever, the
    /// defect is logged and the actor treated as anonymous.
    pub async fn resolve(&self) -> AuthState {
        let (tx, rx) = oneshot::channel();
        // The callback owns the only sender handle: if the provider drops the
        // callback without firing, the channel errors instead of hanging.
        let slot = Mutex::new(Some(tx));
        let id = self.provider.subscribe(Arc::new(move |actor| {
            if let Ok(mut guard) = slot.lock() {
                if let Some(tx) = guard.take() {
                    let _ = tx.send(actor);
                }
            }
        }));

        let delivered = rx.await;
        self.provider.unsubscribe(id);

        match delivered {
            Ok(Some(actor_id)) => AuthState::Authenticated { actor_id },
            Ok(None) => AuthState::Anonymous,
            Err(_) => {
                tracing::error!(
                    "identity provider dropped its subscription without firing; \
                     treating the actor as anonymous"
                );
                AuthState::Anonymous
            }
        }
    }
}

// --- In-Memory Provider ---

/// StaticIdentityProvider
///
/// In-memory identity provider used by the demo binary and tests. Holds the
/// current actor and a table of live subscribers; `subscribe` fires the
/// callback synchronously with the current state (the strictest variant of
/// the at-least-once contract), and `sign_in`/`sign_out` notify every live
/// subscriber.
#[derive(Default)]
pub struct StaticIdentityProvider {
    current: Mutex<Option<Uuid>>,
    subscribers: Mutex<HashMap<u64, IdentityCallback>>,
    next_id: AtomicU64,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticates `actor_id` and notifies all live subscribers.
    pub fn sign_in(&self, actor_id: Uuid) {
        self.set_current(Some(actor_id));
    }

    /// Clears the authenticated actor and notifies all live subscribers.
    pub fn sign_out(&self) {
        self.set_current(None);
    }

    fn set_current(&self, actor: Option<Uuid>) {
        if let Ok(mut current) = self.current.lock() {
            *current = actor;
        }
        // Callbacks run outside the subscriber lock so a callback may
        // subscribe or unsubscribe without deadlocking.
        let callbacks: Vec<IdentityCallback> = match self.subscribers.lock() {
            Ok(subs) => subs.values().cloned().collect(),
            Err(_) => Vec::new(),
        };
        for callback in callbacks {
            callback(actor);
        }
    }
}

impl IdentityProvider for StaticIdentityProvider {
    fn subscribe(&self, callback: IdentityCallback) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.insert(id, Arc::clone(&callback));
        }
        let current = self.current.lock().map(|c| *c).unwrap_or(None);
        callback(current);
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.remove(&id.0);
        }
    }
}
