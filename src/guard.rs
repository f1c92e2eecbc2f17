use crate::config::ShellConfig;
use crate::models::{AuthState, Role, RoutePolicy};

/// Decision
///
/// What the guard decided for one navigation attempt: show the matched page,
/// or re-dispatch to another path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(String),
}

/// needs_role
///
/// Whether evaluating `policy` against `auth` requires the actor's role.
/// The role is only consulted for authenticated actors on routes that
/// restrict `allowed_roles`; everywhere else the navigator skips the role
/// resolution entirely, sparing the cache and the store.
pub fn needs_role(policy: &RoutePolicy, auth: &AuthState) -> bool {
    policy.requires_auth && auth.is_authenticated() && policy.allowed_roles.is_some()
}

/// evaluate
///
/// The navigation guard. Pure: given the matched policy, the authentication
/// snapshot, the (lazily) resolved role, and the redirect configuration, it
/// produces a decision and nothing else.
///
/// Rules, first match wins:
/// 1. route requires authentication, actor is anonymous: redirect to the
///    sign-in route. Checked before any role logic: a role is meaningless
///    without an identity.
/// 2. route is guest-only, actor is authenticated: redirect home.
/// 3. route restricts roles and the actor is authenticated: admitted roles
///    pass; everything else is redirected to that role's landing route, with
///    unknown and default roles falling to the lowest-privilege landing.
/// 4. otherwise: allow.
///
/// `role` is `None` when the navigator determined no role was needed; rule 3
/// treats a missing role as the lowest-privilege default, so a mis-sequenced
/// caller still fails toward the least privilege.
pub fn evaluate(
    policy: &RoutePolicy,
    auth: &AuthState,
    role: Option<Role>,
    config: &ShellConfig,
) -> Decision {
    if policy.requires_auth && !auth.is_authenticated() {
        return Decision::Redirect(config.sign_in_path.clone());
    }

    if policy.hide_when_authenticated && auth.is_authenticated() {
        return Decision::Redirect(config.home_path.clone());
    }

    if let Some(allowed) = policy.allowed_roles.as_ref() {
        if policy.requires_auth && auth.is_authenticated() {
            let role = role.unwrap_or_default();
            if allowed.contains(&role) {
                return Decision::Allow;
            }
            return Decision::Redirect(config.landing_path_for(role).to_string());
        }
    }

    Decision::Allow
}
