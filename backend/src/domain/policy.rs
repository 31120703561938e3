//! Route authorization policy.
//!
//! A static table mapping (path pattern, method) to a required access
//! level, evaluated after authentication and before any handler runs.
//! Ownership of individual resources is NOT decided here, only role
//! membership; the reservation engine checks ownership per operation.

use crate::domain::auth::Principal;
use crate::domain::user::UserRole;

/// HTTP method subset the policy distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Read.
    Get,
    /// Create.
    Post,
    /// Replace/update.
    Put,
    /// Remove (cancel).
    Delete,
}

impl Method {
    /// Map a method name as seen on the wire; unknown methods fall back to
    /// `None` and only method-agnostic rules can match them.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "DELETE" => Some(Self::Delete),
            _ => None,
        }
    }
}

/// Access level a rule demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No principal required.
    Public,
    /// Any authenticated principal.
    Authenticated,
    /// Principal whose role is in the given set.
    Roles(&'static [UserRole]),
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Proceed to the handler.
    Permit,
    /// Protected route, no valid principal.
    Unauthenticated,
    /// Principal present but role not in the required set.
    Forbidden,
}

struct Rule {
    pattern: &'static str,
    method: Option<Method>,
    access: Access,
}

/// Rule table mirroring the original deployment's security configuration.
/// Order in this table is irrelevant; specificity decides.
const RULES: &[Rule] = &[
    Rule {
        pattern: "/api/users/signin",
        method: None,
        access: Access::Public,
    },
    Rule {
        pattern: "/api/users/signup",
        method: None,
        access: Access::Public,
    },
    Rule {
        pattern: "/api/hotels/**",
        method: Some(Method::Get),
        access: Access::Public,
    },
    Rule {
        pattern: "/api/users",
        method: Some(Method::Get),
        access: Access::Roles(&[UserRole::Admin]),
    },
    Rule {
        pattern: "/api/bookings",
        method: Some(Method::Get),
        access: Access::Roles(&[UserRole::Admin]),
    },
    Rule {
        pattern: "/api/bookings/**",
        method: None,
        access: Access::Roles(&[UserRole::Customer, UserRole::Admin]),
    },
];

/// The process-wide policy table.
///
/// # Examples
/// ```
/// use backend::domain::policy::{Decision, Method, PolicyTable};
///
/// let policy = PolicyTable::standard();
/// let decision = policy.evaluate("/api/hotels", Some(Method::Get), None);
/// assert_eq!(decision, Decision::Permit);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyTable;

impl PolicyTable {
    /// The built-in rule set.
    pub fn standard() -> Self {
        Self
    }

    /// Evaluate a request against the table.
    ///
    /// Most specific pattern wins: more literal segments first, then a
    /// method-specific rule over a method-agnostic one. Unmatched paths
    /// default to any-authenticated.
    pub fn evaluate(
        &self,
        path: &str,
        method: Option<Method>,
        principal: Option<&Principal>,
    ) -> Decision {
        let access = RULES
            .iter()
            .filter(|rule| rule_matches(rule, path, method))
            .max_by_key(|rule| specificity(rule))
            .map_or(Access::Authenticated, |rule| rule.access);

        match (access, principal) {
            (Access::Public, _) => Decision::Permit,
            (_, None) => Decision::Unauthenticated,
            (Access::Authenticated, Some(_)) => Decision::Permit,
            (Access::Roles(allowed), Some(p)) if p.has_any_role(allowed) => Decision::Permit,
            (Access::Roles(_), Some(_)) => Decision::Forbidden,
        }
    }
}

fn rule_matches(rule: &Rule, path: &str, method: Option<Method>) -> bool {
    if let Some(required) = rule.method {
        if method != Some(required) {
            return false;
        }
    }
    pattern_matches(rule.pattern, path)
}

/// Literal segment match with a trailing `/**` wildcard covering zero or
/// more further segments (so `/api/hotels/**` also matches `/api/hotels`).
fn pattern_matches(pattern: &str, path: &str) -> bool {
    match pattern.strip_suffix("/**") {
        Some(prefix) => path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/')),
        None => path == pattern,
    }
}

fn specificity(rule: &Rule) -> (usize, bool) {
    let literal_segments = rule
        .pattern
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "**")
        .count();
    (literal_segments, rule.method.is_some())
}
