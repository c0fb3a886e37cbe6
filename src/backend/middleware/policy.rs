/**
 * Access Policy
 *
 * Ordered table of (method, path pattern) → access rules. The first rule
 * that matches decides; a request no rule matches requires authentication.
 *
 * Patterns are either an exact path or end in a trailing `**` segment,
 * which matches the base path itself and everything below it.
 */

use axum::http::Method;

use crate::backend::error::ApiError;
use crate::backend::middleware::identity::Principal;

/// What a rule demands of the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    PermitAll,
    RequireAuthenticated,
}

/// Path matcher for a single rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Exact(String),
    /// Base path and every path beneath it
    Subtree(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        match pattern.strip_suffix("/**") {
            Some(base) => Self::Subtree(base.to_string()),
            None => Self::Exact(pattern.to_string()),
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(exact) => path == exact,
            Self::Subtree(base) => {
                path == base
                    || path
                        .strip_prefix(base.as_str())
                        .is_some_and(|rest| rest.starts_with('/'))
            }
        }
    }
}

/// One row of the policy table; `method: None` matches any method
#[derive(Debug, Clone)]
pub struct Rule {
    pub method: Option<Method>,
    pub pattern: PathPattern,
    pub access: Access,
}

impl Rule {
    pub fn new(method: Option<Method>, pattern: &str, access: Access) -> Self {
        Self {
            method,
            pattern: PathPattern::parse(pattern),
            access,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.as_ref().is_none_or(|m| m == method) && self.pattern.matches(path)
    }
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<Rule>,
}

impl AccessPolicy {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The application's route table
    pub fn standard() -> Self {
        use Access::PermitAll;

        Self::new(vec![
            Rule::new(Some(Method::OPTIONS), "/**", PermitAll),
            Rule::new(Some(Method::POST), "/api/auth/register", PermitAll),
            Rule::new(None, "/api/auth/**", PermitAll),
            Rule::new(Some(Method::GET), "/api/posts", PermitAll),
            Rule::new(Some(Method::POST), "/api/uploads", PermitAll),
            Rule::new(Some(Method::GET), "/uploads/**", PermitAll),
        ])
    }

    pub fn decide(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| rule.access)
            .unwrap_or(Access::RequireAuthenticated)
    }

    /// `Err(Unauthorized)` when the route needs a caller and there is none
    pub fn check(&self, method: &Method, path: &str, principal: &Principal) -> Result<(), ApiError> {
        match self.decide(method, path) {
            Access::PermitAll => Ok(()),
            Access::RequireAuthenticated if principal.is_authenticated() => Ok(()),
            Access::RequireAuthenticated => {
                tracing::debug!("Rejecting anonymous {} {}", method, path);
                Err(ApiError::Unauthorized)
            }
        }
    }
}
