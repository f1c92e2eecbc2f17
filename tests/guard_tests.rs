use portal_shell::guard::{Decision, evaluate, needs_role};
use portal_shell::{AuthState, Page, Role, RoutePolicy, ShellConfig};
use uuid::Uuid;

// --- Helpers ---

fn authenticated() -> AuthState {
    AuthState::Authenticated {
        actor_id: Uuid::from_u128(1),
    }
}

fn protected() -> RoutePolicy {
    RoutePolicy::authenticated("/profile", Page::Profile, "Профиль")
}

fn guest_only() -> RoutePolicy {
    RoutePolicy::guest_only("/auth", Page::Auth, "Авторизация")
}

fn students_only() -> RoutePolicy {
    RoutePolicy::restricted(
        "/profile/edit",
        Page::ProfileEdit,
        "Редактирование профиля",
        &[Role::Student],
    )
}

fn teachers_only() -> RoutePolicy {
    RoutePolicy::restricted("/students", Page::Students, "Студенты", &[Role::Teacher])
}

// --- Rule 1: authentication required ---

#[test]
fn protected_route_redirects_anonymous_to_sign_in() {
    let config = ShellConfig::default();
    let decision = evaluate(&protected(), &AuthState::Anonymous, None, &config);
    assert_eq!(decision, Decision::Redirect("/auth".to_string()));
}

#[test]
fn anonymous_is_sent_to_sign_in_before_any_role_check() {
    // A role-restricted route must not leak a role-specific landing redirect
    // to an actor that is not even authenticated.
    let config = ShellConfig::default();
    let decision = evaluate(&teachers_only(), &AuthState::Anonymous, None, &config);
    assert_eq!(decision, Decision::Redirect("/auth".to_string()));
}

// --- Rule 2: guest-only ---

#[test]
fn guest_only_route_redirects_authenticated_home() {
    let config = ShellConfig::default();
    let decision = evaluate(&guest_only(), &authenticated(), None, &config);
    assert_eq!(decision, Decision::Redirect("/".to_string()));
}

#[test]
fn guest_only_route_allows_anonymous() {
    let config = ShellConfig::default();
    let decision = evaluate(&guest_only(), &AuthState::Anonymous, None, &config);
    assert_eq!(decision, Decision::Allow);
}

// --- Rule 3: role restrictions ---

#[test]
fn allowed_role_passes() {
    let config = ShellConfig::default();
    let decision = evaluate(&students_only(), &authenticated(), Some(Role::Student), &config);
    assert_eq!(decision, Decision::Allow);
}

#[test]
fn rejected_teacher_lands_on_teacher_profile() {
    let config = ShellConfig::default();
    let decision = evaluate(&students_only(), &authenticated(), Some(Role::Teacher), &config);
    assert_eq!(decision, Decision::Redirect("/teacherProfile".to_string()));
}

#[test]
fn rejected_student_lands_on_profile() {
    let config = ShellConfig::default();
    let decision = evaluate(&teachers_only(), &authenticated(), Some(Role::Student), &config);
    assert_eq!(decision, Decision::Redirect("/profile".to_string()));
}

#[test]
fn unassigned_role_falls_to_lowest_privilege_landing() {
    let config = ShellConfig::default();
    let decision = evaluate(&teachers_only(), &authenticated(), Some(Role::Unassigned), &config);
    assert_eq!(decision, Decision::Redirect("/profile".to_string()));
}

#[test]
fn missing_role_is_treated_as_lowest_privilege() {
    // A mis-sequenced caller that never resolved the role must still fail
    // toward the least privilege, never toward an allow.
    let config = ShellConfig::default();
    let decision = evaluate(&teachers_only(), &authenticated(), None, &config);
    assert_eq!(decision, Decision::Redirect("/profile".to_string()));
}

#[test]
fn protected_route_without_role_list_admits_any_authenticated_actor() {
    let config = ShellConfig::default();
    let decision = evaluate(&protected(), &authenticated(), None, &config);
    assert_eq!(decision, Decision::Allow);
}

// --- Rule 4: open routes ---

#[test]
fn public_route_allows_everyone() {
    let config = ShellConfig::default();
    let home = RoutePolicy::public("/", Page::Home, "Главная");
    assert_eq!(evaluate(&home, &AuthState::Anonymous, None, &config), Decision::Allow);
    assert_eq!(evaluate(&home, &authenticated(), None, &config), Decision::Allow);
}

// --- Lazy role resolution predicate ---

#[test]
fn role_is_needed_only_for_authenticated_actors_on_restricted_routes() {
    assert!(needs_role(&students_only(), &authenticated()));
    assert!(!needs_role(&students_only(), &AuthState::Anonymous));
    assert!(!needs_role(&protected(), &authenticated()));
    assert!(!needs_role(&guest_only(), &authenticated()));
}

// --- Exhaustive redirect termination ---

#[test]
fn every_redirect_target_is_allowed_in_one_extra_hop() {
    // For every reachable (policy, auth, role) combination the guard's
    // redirect target must itself evaluate to Allow for the same actor.
    let config = ShellConfig::default();
    let table = portal_shell::routes::portal_routes();

    let auth_states = [AuthState::Anonymous, authenticated()];
    let roles = [
        None,
        Some(Role::Unassigned),
        Some(Role::Student),
        Some(Role::Teacher),
    ];

    for policy in table.policies() {
        for auth in &auth_states {
            for role in &roles {
                if let Decision::Redirect(target) = evaluate(policy, auth, *role, &config) {
                    let landing = table.matches(&target);
                    assert_eq!(
                        evaluate(landing, auth, *role, &config),
                        Decision::Allow,
                        "redirect from '{}' to '{}' did not settle for {:?}/{:?}",
                        policy.pattern,
                        target,
                        auth,
                        role
                    );
                }
            }
        }
    }
}
