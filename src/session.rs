use crate::models::Role;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// SessionCache
///
/// Process-local cache of resolved role assignments, scoped to the current
/// browser session, never to the process as a whole. Entries live from first
/// lookup until the authenticated actor changes; `clear` must run on every
/// sign-out and actor switch, otherwise a role resolved in a previous session
/// leaks into the next one and grants the wrong permissions.
///
/// Writes are last-writer-wins: a cached role is derived solely from the
/// actor id, so concurrent navigations racing on the same actor converge on
/// the same value and no locking beyond the map mutex is needed.
#[derive(Default)]
pub struct SessionCache {
    roles: Mutex<HashMap<Uuid, Role>>,
}

impl SessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached role for `actor_id`, if this session already resolved one.
    pub fn get(&self, actor_id: Uuid) -> Option<Role> {
        self.roles
            .lock()
            .ok()
            .and_then(|roles| roles.get(&actor_id).copied())
    }

    /// Caches a resolved role for the rest of the session.
    pub fn put(&self, actor_id: Uuid, role: Role) {
        if let Ok(mut roles) = self.roles.lock() {
            roles.insert(actor_id, role);
        }
    }

    /// Drops every entry. Invoked on identity change; afterwards any lookup
    /// is a forced miss and goes back to the store.
    pub fn clear(&self) {
        if let Ok(mut roles) = self.roles.lock() {
            roles.clear();
        }
    }

    /// Number of live entries. Exposed for diagnostics and tests.
    pub fn len(&self) -> usize {
        self.roles.lock().map(|roles| roles.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
