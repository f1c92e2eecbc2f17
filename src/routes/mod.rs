/// Route Table Index
///
/// Declares the portal's route policies, segregated by access level the same
/// way the backend segregates its routers: public, guest-only, and
/// authenticated groups, plus the totality-guaranteeing catch-all. Grouping
/// the declarations by policy keeps access control visible at a glance and
/// prevents a protected page from slipping into the public group unnoticed.
pub mod matcher;

pub use matcher::{RegistrationError, RouteTable};

use crate::models::{Page, Role, RoutePolicy};

/// Routes accessible to everyone, authenticated or not.
pub fn public_routes() -> Vec<RoutePolicy> {
    vec![
        RoutePolicy::public("/", Page::Home, "Главная"),
        RoutePolicy::public("/about", Page::About, "О нас"),
        RoutePolicy::public("/contact", Page::Contact, "Контакты"),
        RoutePolicy::public("/teacher", Page::TeacherList, "Преподователи"),
    ]
}

/// Routes shown only to guests. An authenticated actor has no business on the
/// sign-in or registration page and is sent home instead.
pub fn guest_routes() -> Vec<RoutePolicy> {
    vec![
        RoutePolicy::guest_only("/auth", Page::Auth, "Авторизация"),
        RoutePolicy::guest_only("/register", Page::Register, "Регистрация"),
    ]
}

/// Routes requiring an authenticated actor. The landing routes (`/profile`,
/// `/teacherProfile`) deliberately carry no `allowed_roles`: they are redirect
/// targets for role mismatches elsewhere, so any authenticated actor must be
/// able to land on them in a single hop.
pub fn authenticated_routes() -> Vec<RoutePolicy> {
    vec![
        RoutePolicy::authenticated("/profile", Page::Profile, "Профиль"),
        RoutePolicy::restricted(
            "/profile/edit",
            Page::ProfileEdit,
            "Редактирование профиля",
            &[Role::Student],
        ),
        RoutePolicy::authenticated(
            "/teacherProfile",
            Page::TeacherProfile,
            "Профиль преподавателя",
        ),
        RoutePolicy::restricted("/students", Page::Students, "Студенты", &[Role::Teacher]),
        RoutePolicy::restricted(
            "/students/:id",
            Page::StudentDetails,
            "Карточка студента",
            &[Role::Teacher],
        ),
    ]
}

/// The catch-all. Matches anything the table does not know and shows the
/// not-found page without any authentication constraints.
pub fn not_found_route() -> RoutePolicy {
    RoutePolicy::public("*", Page::NotFound, "Страница не найдена")
}

/// portal_routes
///
/// Assembles and validates the complete portal route table.
///
/// # Panics
/// Panics if the declared policies fail registration validation. The table is
/// static configuration; an invalid declaration is a defect caught at startup,
/// never at navigation time.
pub fn portal_routes() -> RouteTable {
    let mut policies = Vec::new();
    policies.extend(public_routes());
    policies.extend(guest_routes());
    policies.extend(authenticated_routes());
    policies.push(not_found_route());

    RouteTable::new(policies).expect("FATAL: portal route table failed validation")
}
