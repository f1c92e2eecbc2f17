// --- Module Structure ---

// Core navigation-authorization services.
pub mod config;
pub mod guard;
pub mod identity;
pub mod models;
pub mod navigator;
pub mod roles;
pub mod session;

// Route table declaration and matching.
pub mod routes;

use identity::{IdentityProviderState, IdentityResolver, SubscriptionId};
use navigator::{Navigator, TitleSinkState};
use roles::{RecordStoreState, RoleResolver};
use routes::RouteTable;
use std::sync::Arc;

// --- Public Re-exports ---

// Makes the assembly types easily accessible to the binary entry point.
pub use config::{Env, ShellConfig};
pub use models::{AuthState, NavigationOutcome, Page, Role, RoutePolicy, UserRecord};
pub use navigator::{RecordingTitleSink, TitleSink};

/// Shell
///
/// The assembled single-page-application shell: the navigator wired to its
/// collaborators, plus the long-lived identity subscription that keeps the
/// session role cache honest. Every collaborator is injected here, with no
/// module-level singletons, so tests assemble a shell from fakes and get
/// deterministic navigation decisions.
pub struct Shell {
    navigator: Arc<Navigator>,
    identity_provider: IdentityProviderState,
    cache_subscription: SubscriptionId,
}

impl Shell {
    /// new
    ///
    /// Wires the shell together. Beyond constructing the navigator, this
    /// opens one permanent subscription on the identity provider whose only
    /// job is cache invalidation: the moment the authenticated actor changes,
    /// the session role cache is cleared before any navigation triggered by
    /// the new identity can resolve a role against stale entries.
    pub fn new(
        table: RouteTable,
        identity_provider: IdentityProviderState,
        record_store: RecordStoreState,
        title_sink: TitleSinkState,
        config: ShellConfig,
    ) -> Self {
        let roles = Arc::new(RoleResolver::new(record_store));

        let invalidation = Arc::clone(&roles);
        let cache_subscription = identity_provider.subscribe(Arc::new(move |actor| {
            invalidation.handle_identity_change(actor);
        }));

        let navigator = Arc::new(Navigator::new(
            table,
            IdentityResolver::new(Arc::clone(&identity_provider)),
            roles,
            title_sink,
            config,
        ));

        Self {
            navigator,
            identity_provider,
            cache_subscription,
        }
    }

    /// The navigation entry point shared with the rendering layer.
    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }
}

impl Drop for Shell {
    /// Releases the cache-invalidation subscription so a torn-down shell
    /// leaves no listener behind on a longer-lived provider.
    fn drop(&mut self) {
        self.identity_provider.unsubscribe(self.cache_subscription);
    }
}
