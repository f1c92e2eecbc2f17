use crate::models::Role;
use std::collections::HashMap;
use std::env;

/// ShellConfig
///
/// Holds the shell's entire redirect and presentation configuration. The
/// struct is immutable once loaded, ensuring every concurrent navigation sees
/// the same targets, and is injected into the Navigator at assembly time
/// rather than read from ambient globals.
#[derive(Clone)]
pub struct ShellConfig {
    /// Runtime environment marker. Controls the logging format in the binary.
    pub env: Env,
    /// Where unauthenticated actors land when a route requires authentication.
    pub sign_in_path: String,
    /// Where authenticated actors land when a route is guest-only.
    pub home_path: String,
    /// Per-role landing routes for role-mismatch redirects. Roles missing
    /// from the map fall back to `fallback_landing_path`.
    pub role_landing_paths: HashMap<Role, String>,
    /// Lowest-privilege landing route, used for unknown or default roles.
    pub fallback_landing_path: String,
    /// Title committed when a policy carries an empty display title.
    pub default_title: String,
}

/// Env
///
/// Defines the runtime context. Local gets human-readable pretty logs;
/// Production gets JSON output for log aggregators.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for ShellConfig {
    /// default
    ///
    /// The canonical redirect topology of the portal, matching the deployed
    /// route table: sign-in at `/auth`, home at `/`, teachers land on
    /// `/teacherProfile`, everyone else on `/profile`. Also the instance used
    /// by tests that do not exercise configuration loading.
    fn default() -> Self {
        let mut role_landing_paths = HashMap::new();
        role_landing_paths.insert(Role::Teacher, "/teacherProfile".to_string());
        role_landing_paths.insert(Role::Student, "/profile".to_string());

        Self {
            env: Env::Local,
            sign_in_path: "/auth".to_string(),
            home_path: "/".to_string(),
            role_landing_paths,
            fallback_landing_path: "/profile".to_string(),
            default_title: "МВЕК".to_string(),
        }
    }
}

impl ShellConfig {
    /// load
    ///
    /// Initializes the configuration at startup from environment variables,
    /// falling back to the canonical defaults. Unlike a server's database
    /// credentials, none of these values are security-critical secrets, so a
    /// missing variable is never fatal.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let defaults = Self::default();
        Self {
            env,
            sign_in_path: env::var("SHELL_SIGN_IN_PATH").unwrap_or(defaults.sign_in_path),
            home_path: env::var("SHELL_HOME_PATH").unwrap_or(defaults.home_path),
            role_landing_paths: defaults.role_landing_paths,
            fallback_landing_path: env::var("SHELL_FALLBACK_LANDING_PATH")
                .unwrap_or(defaults.fallback_landing_path),
            default_title: env::var("SHELL_DEFAULT_TITLE").unwrap_or(defaults.default_title),
        }
    }

    /// landing_path_for
    ///
    /// Resolves the landing route for an actor whose role was rejected by a
    /// route's `allowed_roles`. Unknown and default roles fall back to the
    /// lowest-privilege landing route, never to an elevated one.
    pub fn landing_path_for(&self, role: Role) -> &str {
        self.role_landing_paths
            .get(&role)
            .map(String::as_str)
            .unwrap_or(&self.fallback_landing_path)
    }
}
