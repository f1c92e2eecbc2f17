use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// --- Core Access-Control Types ---

/// Role
///
/// The coarse permission tag attached to an actor, sourced from the external
/// user-record store. `Unassigned` is the lowest-privilege default: it is what
/// an actor degrades to when its record is missing, the role field is absent
/// or malformed, or the store lookup fails outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Unassigned,
    Student,
    Teacher,
}

impl FromStr for Role {
    type Err = ();

    /// Parses the raw role string stored in an external user record.
    /// Unknown strings are an error so the caller can log and degrade
    /// to `Role::Unassigned` explicitly.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "unassigned" => Ok(Role::Unassigned),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Unassigned => write!(f, "unassigned"),
            Role::Student => write!(f, "student"),
            Role::Teacher => write!(f, "teacher"),
        }
    }
}

/// AuthState
///
/// The authentication snapshot for a single navigation attempt. Produced fresh
/// by the identity resolver on every guard evaluation and never persisted: the
/// underlying identity subscription can change between navigations (sign-out
/// in another tab, token expiry), so a cached snapshot would lie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated { actor_id: Uuid },
}

impl AuthState {
    /// Whether this snapshot carries an authenticated actor.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    /// The actor id, if authenticated.
    pub fn actor_id(&self) -> Option<Uuid> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated { actor_id } => Some(*actor_id),
        }
    }
}

/// UserRecord
///
/// A row from the external persistent user-record store, reduced to the fields
/// the navigation core cares about. The role is kept as the raw stored string:
/// the store is an external collaborator and may hold anything, so parsing
/// (and degrading) happens in the role resolver, not at deserialization time.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserRecord {
    /// Stable opaque identifier of the actor this record belongs to.
    pub actor_id: Uuid,
    /// The actor's primary contact identifier.
    pub email: String,
    /// Raw role tag as stored ('student', 'teacher', ...); absent for
    /// freshly registered actors that were never assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

// --- Route Policy ---

/// Page
///
/// Identifier of a registered view. One variant per page component the shell
/// knows how to show; the rendering layer maps these to actual markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Home,
    About,
    Contact,
    Register,
    Auth,
    Profile,
    ProfileEdit,
    TeacherProfile,
    Students,
    StudentDetails,
    TeacherList,
    NotFound,
}

/// RoutePolicy
///
/// The access-control metadata attached to one URL pattern. This is a closed,
/// typed record: every field the guard consults is declared here and validated
/// at registration time, instead of living in an open string-keyed meta bag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePolicy {
    /// Path pattern. Segments are static (`/profile`), named parameters
    /// (`/students/:id`), or a single trailing catch-all (`*`).
    pub pattern: String,
    /// The page shown when navigation to this route commits.
    pub page: Page,
    /// Display title committed as a side effect on successful navigation.
    pub title: String,
    /// The route is reachable only by authenticated actors.
    #[serde(default)]
    pub requires_auth: bool,
    /// The route is hidden from authenticated actors (sign-in/register pages).
    /// Mutually exclusive with `requires_auth`; registration rejects a policy
    /// with both set.
    #[serde(default)]
    pub hide_when_authenticated: bool,
    /// Roles admitted to this route. Only meaningful with `requires_auth`;
    /// `None` admits any authenticated actor regardless of role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_roles: Option<Vec<Role>>,
}

impl RoutePolicy {
    /// Builds an open policy: no authentication constraints.
    pub fn public(pattern: &str, page: Page, title: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            page,
            title: title.to_string(),
            requires_auth: false,
            hide_when_authenticated: false,
            allowed_roles: None,
        }
    }

    /// Builds a guest-only policy, redirected away from once authenticated.
    pub fn guest_only(pattern: &str, page: Page, title: &str) -> Self {
        Self {
            hide_when_authenticated: true,
            ..Self::public(pattern, page, title)
        }
    }

    /// Builds a policy reachable by any authenticated actor.
    pub fn authenticated(pattern: &str, page: Page, title: &str) -> Self {
        Self {
            requires_auth: true,
            ..Self::public(pattern, page, title)
        }
    }

    /// Builds a policy reachable only by authenticated actors holding one of
    /// the given roles.
    pub fn restricted(pattern: &str, page: Page, title: &str, roles: &[Role]) -> Self {
        Self {
            requires_auth: true,
            allowed_roles: Some(roles.to_vec()),
            ..Self::public(pattern, page, title)
        }
    }

    /// Whether this policy is the trailing catch-all.
    pub fn is_catch_all(&self) -> bool {
        self.pattern == "*"
    }
}

// --- Navigation Outcomes ---

/// NavigationOutcome
///
/// The result of one call to `Navigator::navigate_to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum NavigationOutcome {
    /// The guard allowed the requested path; the page title was committed.
    Committed { path: String, title: String },
    /// The guard denied the requested path and the navigation was
    /// re-dispatched to `to`, which itself committed.
    Redirected { to: String },
    /// A newer navigation started while this one was suspended; nothing was
    /// committed on its behalf.
    Superseded,
}
