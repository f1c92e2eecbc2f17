use crate::models::RoutePolicy;
use thiserror::Error;

/// RegistrationError
///
/// Raised while building a `RouteTable` from declared policies. Any of these
/// is a configuration defect: the table is static and enumerated at startup,
/// so the shell fails fast instead of limping along with a broken policy set.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("route '{0}' both requires and hides for authentication")]
    ConflictingPolicy(String),
    #[error("route pattern '{0}' declared more than once")]
    DuplicatePattern(String),
    #[error("route table has no catch-all pattern")]
    MissingCatchAll,
    #[error("route pattern '{0}' is malformed")]
    MalformedPattern(String),
}

/// RouteTable
///
/// The immutable set of declared route policies plus the matcher over them.
/// Matching is total by construction: registration rejects a table without a
/// catch-all, so `matches` can always hand the guard exactly one policy.
#[derive(Debug)]
pub struct RouteTable {
    policies: Vec<RoutePolicy>,
    catch_all: usize,
}

impl RouteTable {
    /// new
    ///
    /// Validates and seals the declared policies. Rejects a policy that both
    /// requires and hides for authentication, duplicate patterns, patterns
    /// that do not start with `/`, and a table missing its catch-all.
    pub fn new(policies: Vec<RoutePolicy>) -> Result<Self, RegistrationError> {
        let mut catch_all = None;

        for (i, policy) in policies.iter().enumerate() {
            if policy.requires_auth && policy.hide_when_authenticated {
                return Err(RegistrationError::ConflictingPolicy(policy.pattern.clone()));
            }
            if policies[..i].iter().any(|p| p.pattern == policy.pattern) {
                return Err(RegistrationError::DuplicatePattern(policy.pattern.clone()));
            }
            if policy.is_catch_all() {
                catch_all = Some(i);
            } else if !policy.pattern.starts_with('/') {
                return Err(RegistrationError::MalformedPattern(policy.pattern.clone()));
            }
        }

        let catch_all = catch_all.ok_or(RegistrationError::MissingCatchAll)?;
        Ok(Self {
            policies,
            catch_all,
        })
    }

    /// matches
    ///
    /// Resolves a path to exactly one policy. Segment-wise matching: static
    /// segments must match exactly, a `:name` segment matches any single
    /// segment, and the catch-all absorbs anything left unmatched. Static
    /// segments outrank parameters and the catch-all never masks a more
    /// specific pattern, regardless of declaration order.
    pub fn matches(&self, path: &str) -> &RoutePolicy {
        let segments = path_segments(path);

        let mut best: Option<(usize, usize)> = None;
        for (i, policy) in self.policies.iter().enumerate() {
            if policy.is_catch_all() {
                continue;
            }
            if let Some(score) = match_score(&policy.pattern, &segments) {
                // Higher static-segment count wins; ties go to declaration order.
                if best.map(|(_, s)| score > s).unwrap_or(true) {
                    best = Some((i, score));
                }
            }
        }

        match best {
            Some((i, _)) => &self.policies[i],
            None => &self.policies[self.catch_all],
        }
    }

    /// All declared policies, in declaration order.
    pub fn policies(&self) -> &[RoutePolicy] {
        &self.policies
    }

    /// The catch-all not-found policy. Also what the navigator shows when a
    /// redirect chain exceeds its hop cap.
    pub fn not_found(&self) -> &RoutePolicy {
        &self.policies[self.catch_all]
    }
}

/// Splits a path into its segments, dropping any query or fragment suffix and
/// a trailing slash. The root path yields no segments.
fn path_segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Matches one non-catch-all pattern against already-split path segments.
/// Returns the number of exactly-matched static segments, or `None` when the
/// pattern does not cover the path.
fn match_score(pattern: &str, segments: &[&str]) -> Option<usize> {
    let pattern_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if pattern_segments.len() != segments.len() {
        return None;
    }

    let mut statics = 0;
    for (ps, s) in pattern_segments.iter().zip(segments) {
        if ps.starts_with(':') {
            continue;
        }
        if ps != s {
            return None;
        }
        statics += 1;
    }
    Some(statics)
}
