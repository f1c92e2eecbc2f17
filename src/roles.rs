use crate::models::{Role, UserRecord};
use crate::session::SessionCache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use uuid::Uuid;

// --- Record Store Contract ---

/// StoreError
///
/// Failure modes of the external user-record store. The role resolver never
/// propagates any of these: every one degrades to the lowest-privilege role.
/// The type exists so the store seam stays honest about what can go wrong.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record store unreachable: {0}")]
    Unavailable(String),
    #[error("record store denied the lookup: {0}")]
    PermissionDenied(String),
    #[error("record store returned a malformed payload: {0}")]
    Malformed(String),
}

/// UserRecordStore
///
/// Contract for the external persistent user-record store. A lookup returns
/// at most one record whose actor-identifier field equals the queried id.
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    async fn find_by_actor(&self, actor_id: Uuid) -> Result<Option<UserRecord>, StoreError>;
}

/// The shared handle type used to inject the store into the shell.
pub type RecordStoreState = Arc<dyn UserRecordStore>;

// --- Role Resolution ---

/// RoleResolver
///
/// Resolves an actor's role, preferring the session-scoped cache over the
/// external store. The resolution never fails toward privilege: a missing
/// record, a malformed role field, or a store error all yield
/// `Role::Unassigned`, logged locally and never surfaced to the caller.
///
/// Safe to call concurrently for the same actor; cache writes are
/// last-writer-wins and the written value depends only on the actor id.
pub struct RoleResolver {
    store: RecordStoreState,
    cache: SessionCache,
    last_actor: Mutex<Option<Uuid>>,
}

impl RoleResolver {
    pub fn new(store: RecordStoreState) -> Self {
        Self {
            store,
            cache: SessionCache::new(),
            last_actor: Mutex::new(None),
        }
    }

    /// resolve
    ///
    /// The role lookup algorithm, in order:
    /// 1. session cache hit: return immediately, no store traffic;
    /// 2. miss: query the external store;
    /// 3. record found: parse its role field (absent or malformed degrades
    ///    to `Unassigned`), cache the result for the session, return it;
    /// 4. record missing or lookup failed: log and return `Unassigned`
    ///    without caching, so a later navigation retries the store.
    pub async fn resolve(&self, actor_id: Uuid) -> Role {
        if let Some(role) = self.cache.get(actor_id) {
            tracing::debug!(%actor_id, %role, "role resolved from session cache");
            return role;
        }

        match self.store.find_by_actor(actor_id).await {
            Ok(Some(record)) => {
                let role = match record.role.as_deref() {
                    Some(raw) => raw.parse().unwrap_or_else(|_| {
                        tracing::warn!(%actor_id, raw, "unrecognized role tag in user record");
                        Role::Unassigned
                    }),
                    None => Role::Unassigned,
                };
                self.cache.put(actor_id, role);
                tracing::debug!(%actor_id, %role, "role resolved from record store");
                role
            }
            Ok(None) => {
                tracing::warn!(%actor_id, "no user record for actor; defaulting role");
                Role::Unassigned
            }
            Err(e) => {
                tracing::error!(%actor_id, error = %e, "role lookup failed; defaulting role");
                Role::Unassigned
            }
        }
    }

    /// handle_identity_change
    ///
    /// Reacts to an identity-change notification from the provider. Whenever
    /// the observed actor differs from the last one seen, the entire session
    /// cache is dropped before any subsequent lookup can read it: the cache
    /// is scoped to the session, and a role cached for the previous actor
    /// must not survive into the next one.
    pub fn handle_identity_change(&self, actor: Option<Uuid>) {
        let Ok(mut last) = self.last_actor.lock() else {
            return;
        };
        if *last != actor {
            self.cache.clear();
            tracing::debug!(?actor, "actor changed; session role cache cleared");
            *last = actor;
        }
    }

    /// The session cache backing this resolver.
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }
}

// --- In-Memory Store ---

/// InMemoryUserRecordStore
///
/// HashMap-backed store used by the demo binary and tests. Counts lookups so
/// idempotence tests can assert "at most one store query", and can be toggled
/// unavailable to exercise the degraded path.
#[derive(Default)]
pub struct InMemoryUserRecordStore {
    records: Mutex<HashMap<Uuid, UserRecord>>,
    lookups: AtomicU64,
    unavailable: AtomicBool,
}

impl InMemoryUserRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one record, replacing any previous record for the same actor.
    pub fn insert(&self, record: UserRecord) {
        if let Ok(mut records) = self.records.lock() {
            records.insert(record.actor_id, record);
        }
    }

    /// Number of lookups that reached this store (cache hits never do).
    pub fn lookups(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    /// Makes every subsequent lookup fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }
}

#[async_trait]
impl UserRecordStore for InMemoryUserRecordStore {
    async fn find_by_actor(&self, actor_id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable("store marked unavailable".into()));
        }
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let record = self
            .records
            .lock()
            .map_err(|_| StoreError::Malformed("record table poisoned".into()))?
            .get(&actor_id)
            .cloned();
        Ok(record)
    }
}
