//! Policy triples and path pattern matching.

use authhub_core::config::PolicyRule;
use authhub_core::error::AppError;

/// One allow rule.
///
/// `path` may end in `*` (any suffix) and may contain `{param}` segments
/// matching exactly one non-empty path segment. `method` `*` matches any verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    pub role: String,
    pub path: String,
    pub method: String,
}

impl Policy {
    pub fn new(role: impl Into<String>, path: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            path: path.into(),
            method: method.into().to_uppercase(),
        }
    }

    pub fn matches(&self, role: &str, path: &str, method: &str) -> bool {
        self.role == role
            && (self.method == "*" || self.method.eq_ignore_ascii_case(method))
            && path_matches(&self.path, path)
    }
}

impl From<&PolicyRule> for Policy {
    fn from(rule: &PolicyRule) -> Self {
        Self::new(&rule.role, &rule.path, &rule.method)
    }
}

impl From<&Policy> for PolicyRule {
    fn from(policy: &Policy) -> Self {
        PolicyRule::new(&policy.role, &policy.path, &policy.method)
    }
}

fn path_matches(pattern: &str, path: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix('*') {
        return path.starts_with(prefix);
    }

    let mut expected = pattern.trim_end_matches('/').split('/');
    let mut actual = path.trim_end_matches('/').split('/');
    loop {
        match (expected.next(), actual.next()) {
            (None, None) => return true,
            (Some(p), Some(a)) => {
                let is_param = p.len() > 2 && p.starts_with('{') && p.ends_with('}');
                if is_param {
                    if a.is_empty() {
                        return false;
                    }
                } else if p != a {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// Parse Casbin-style policy lines: `p, role, path, method`.
///
/// Blank lines and `#` comments are skipped.
pub fn parse_policy_csv(text: &str) -> Result<Vec<PolicyRule>, AppError> {
    let mut rules = Vec::new();
    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields.as_slice() {
            ["p", role, path, method] if !role.is_empty() && !path.is_empty() => {
                rules.push(PolicyRule::new(*role, *path, *method));
            }
            _ => {
                return Err(AppError::configuration(format!(
                    "Invalid policy on line {}: '{line}'",
                    index + 1
                )));
            }
        }
    }
    Ok(rules)
}
