use portal_shell::routes::{RegistrationError, RouteTable, portal_routes};
use portal_shell::{Page, Role, RoutePolicy};

// --- Helpers ---

fn catch_all() -> RoutePolicy {
    RoutePolicy::public("*", Page::NotFound, "Страница не найдена")
}

// --- Matching ---

#[test]
fn static_routes_match_exactly() {
    let table = portal_routes();
    assert_eq!(table.matches("/").page, Page::Home);
    assert_eq!(table.matches("/profile").page, Page::Profile);
    assert_eq!(table.matches("/profile/edit").page, Page::ProfileEdit);
    assert_eq!(table.matches("/teacherProfile").page, Page::TeacherProfile);
}

#[test]
fn parameter_segment_matches_any_single_segment() {
    let table = portal_routes();
    assert_eq!(table.matches("/students/42").page, Page::StudentDetails);
    assert_eq!(
        table.matches("/students/9b2e6c1a-aaaa-bbbb-cccc-000000000001").page,
        Page::StudentDetails
    );
    // The parameter covers exactly one segment, not a subtree.
    assert_eq!(table.matches("/students/42/grades").page, Page::NotFound);
}

#[test]
fn unknown_path_always_falls_to_catch_all() {
    let table = portal_routes();
    assert_eq!(table.matches("/this/path/does/not/exist").page, Page::NotFound);
    assert_eq!(table.matches("/profil").page, Page::NotFound);
    assert_eq!(table.matches("").page, Page::Home);
}

#[test]
fn trailing_slash_query_and_fragment_are_ignored() {
    let table = portal_routes();
    assert_eq!(table.matches("/about/").page, Page::About);
    assert_eq!(table.matches("/about?tab=history").page, Page::About);
    assert_eq!(table.matches("/about#staff").page, Page::About);
}

#[test]
fn static_segment_beats_parameter_regardless_of_declaration_order() {
    // The parameterized pattern is declared first; the static one must still win.
    let table = RouteTable::new(vec![
        RoutePolicy::restricted("/students/:id", Page::StudentDetails, "Карточка студента", &[
            Role::Teacher,
        ]),
        RoutePolicy::public("/students/top", Page::Students, "Лучшие студенты"),
        catch_all(),
    ])
    .unwrap();

    assert_eq!(table.matches("/students/top").page, Page::Students);
    assert_eq!(table.matches("/students/77").page, Page::StudentDetails);
}

#[test]
fn catch_all_never_masks_a_more_specific_pattern() {
    // Catch-all declared first; specific routes must still be reachable.
    let table = RouteTable::new(vec![
        catch_all(),
        RoutePolicy::public("/about", Page::About, "О нас"),
    ])
    .unwrap();

    assert_eq!(table.matches("/about").page, Page::About);
    assert_eq!(table.matches("/anything-else").page, Page::NotFound);
}

// --- Registration Validation ---

#[test]
fn rejects_policy_that_both_requires_and_hides_for_authentication() {
    let mut conflicting = RoutePolicy::authenticated("/broken", Page::Profile, "Профиль");
    conflicting.hide_when_authenticated = true;

    let err = RouteTable::new(vec![conflicting, catch_all()]).unwrap_err();
    assert_eq!(err, RegistrationError::ConflictingPolicy("/broken".to_string()));
}

#[test]
fn rejects_duplicate_patterns() {
    let err = RouteTable::new(vec![
        RoutePolicy::public("/about", Page::About, "О нас"),
        RoutePolicy::public("/about", Page::Contact, "Контакты"),
        catch_all(),
    ])
    .unwrap_err();
    assert_eq!(err, RegistrationError::DuplicatePattern("/about".to_string()));
}

#[test]
fn rejects_table_without_catch_all() {
    let err = RouteTable::new(vec![RoutePolicy::public("/", Page::Home, "Главная")]).unwrap_err();
    assert_eq!(err, RegistrationError::MissingCatchAll);
}

#[test]
fn rejects_pattern_without_leading_slash() {
    let err = RouteTable::new(vec![
        RoutePolicy::public("about", Page::About, "О нас"),
        catch_all(),
    ])
    .unwrap_err();
    assert_eq!(err, RegistrationError::MalformedPattern("about".to_string()));
}

#[test]
fn portal_table_validates_at_startup() {
    // The deployed table must never panic during assembly.
    let table = portal_routes();
    assert!(table.policies().iter().any(|p| p.is_catch_all()));
}
