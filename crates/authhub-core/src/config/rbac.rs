//! Access-control policy configuration.

use serde::{Deserialize, Serialize};

/// A single `(role, path, method)` policy triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PolicyRule {
    /// Role name as carried in access token claims.
    pub role: String,
    /// Route pattern. `*` matches any suffix, `{name}` matches one segment.
    pub path: String,
    /// HTTP method, or `*` for any.
    pub method: String,
}

impl PolicyRule {
    /// Build a rule from its three parts.
    pub fn new(role: impl Into<String>, path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            path: path.into(),
            method: method.into(),
        }
    }
}

/// RBAC policy sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Inline policy rules.
    #[serde(default = "default_rules")]
    pub rules: Vec<PolicyRule>,
    /// Optional CSV policy file with `p, role, path, method` lines,
    /// loaded in addition to the inline rules.
    #[serde(default)]
    pub policy_file: Option<String>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            policy_file: None,
        }
    }
}

fn default_rules() -> Vec<PolicyRule> {
    vec![
        PolicyRule::new("admin", "/admin/register", "POST"),
        PolicyRule::new("admin", "/admin/users", "GET"),
    ]
}
