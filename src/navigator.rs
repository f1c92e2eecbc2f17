use crate::config::ShellConfig;
use crate::guard::{self, Decision};
use crate::identity::IdentityResolver;
use crate::models::NavigationOutcome;
use crate::roles::RoleResolver;
use crate::routes::RouteTable;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Redirect targets are fixed low-privilege routes, so a well-authored table
/// resolves in one extra hop. Anything past the cap is a policy defect.
const MAX_REDIRECT_HOPS: u32 = 1;

// --- Title Side Effect ---

/// TitleSink
///
/// The one side effect a committed navigation performs: updating the
/// displayed page title. Behind a trait so the DOM stays a collaborator and
/// tests can record what would have been shown.
pub trait TitleSink: Send + Sync {
    fn set_title(&self, title: &str);
}

/// The shared handle type used to inject the sink into the shell.
pub type TitleSinkState = Arc<dyn TitleSink>;

/// RecordingTitleSink
///
/// Default sink: remembers the last committed title and logs it. Used by the
/// demo binary and by tests asserting on committed titles.
#[derive(Default)]
pub struct RecordingTitleSink {
    last: Mutex<Option<String>>,
}

impl RecordingTitleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently committed title, if any navigation committed yet.
    pub fn last_title(&self) -> Option<String> {
        self.last.lock().ok().and_then(|last| last.clone())
    }
}

impl TitleSink for RecordingTitleSink {
    fn set_title(&self, title: &str) {
        tracing::info!(title, "page title committed");
        if let Ok(mut last) = self.last.lock() {
            *last = Some(title.to_string());
        }
    }
}

// --- Navigator ---

/// Navigator
///
/// Orchestrates every navigation attempt: match the path, resolve identity,
/// resolve the role if the matched policy needs one, apply the guard, then
/// commit or re-dispatch. All collaborators are injected at construction;
/// the navigator itself holds no ambient state beyond the navigation epoch.
pub struct Navigator {
    table: RouteTable,
    identity: IdentityResolver,
    roles: Arc<RoleResolver>,
    title: TitleSinkState,
    config: ShellConfig,
    epoch: AtomicU64,
}

impl Navigator {
    pub fn new(
        table: RouteTable,
        identity: IdentityResolver,
        roles: Arc<RoleResolver>,
        title: TitleSinkState,
        config: ShellConfig,
    ) -> Self {
        Self {
            table,
            identity,
            roles,
            title,
            config,
            epoch: AtomicU64::new(0),
        }
    }

    /// navigate_to
    ///
    /// Runs the guard pipeline for one navigation attempt.
    ///
    /// Each attempt claims a fresh epoch; after every suspension point the
    /// epoch is re-checked, and an attempt overtaken by a newer one returns
    /// `Superseded` without committing a title or following a redirect.
    ///
    /// A redirect re-enters the pipeline for its target. Hops are capped at
    /// `MAX_REDIRECT_HOPS`: a target that itself redirects is a mis-authored
    /// policy, logged as an error and shown as the not-found page rather than
    /// chased further.
    pub async fn navigate_to(&self, path: &str) -> NavigationOutcome {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let mut current = path.to_string();
        let mut hops = 0u32;

        loop {
            let policy = self.table.matches(&current);
            tracing::debug!(path = %current, pattern = %policy.pattern, "route matched");

            let auth = self.identity.resolve().await;
            if self.superseded(epoch) {
                return NavigationOutcome::Superseded;
            }

            let role = match (guard::needs_role(policy, &auth), auth.actor_id()) {
                (true, Some(actor_id)) => Some(self.roles.resolve(actor_id).await),
                _ => None,
            };
            if self.superseded(epoch) {
                return NavigationOutcome::Superseded;
            }

            match guard::evaluate(policy, &auth, role, &self.config) {
                Decision::Allow => {
                    let title = if policy.title.is_empty() {
                        self.config.default_title.clone()
                    } else {
                        policy.title.clone()
                    };
                    self.title.set_title(&title);
                    tracing::info!(path = %current, page = ?policy.page, "navigation committed");

                    return if hops == 0 {
                        NavigationOutcome::Committed {
                            path: current,
                            title,
                        }
                    } else {
                        NavigationOutcome::Redirected { to: current }
                    };
                }
                Decision::Redirect(to) => {
                    if hops >= MAX_REDIRECT_HOPS {
                        let fallback = self.table.not_found();
                        tracing::error!(
                            from = %current,
                            to = %to,
                            "redirect hop cap exceeded; route table mis-authored, showing error page"
                        );
                        self.title.set_title(&fallback.title);
                        return NavigationOutcome::Redirected { to };
                    }
                    tracing::debug!(from = %current, to = %to, "navigation redirected");
                    hops += 1;
                    current = to;
                }
            }
        }
    }

    /// Whether a newer navigation has started since `epoch` was claimed.
    fn superseded(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) != epoch
    }

    /// The route table this navigator dispatches against.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The role resolver shared with the identity-change wiring.
    pub fn roles(&self) -> &Arc<RoleResolver> {
        &self.roles
    }
}
