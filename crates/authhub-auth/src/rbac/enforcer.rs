//! RBAC enforcement over a mutable policy table.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use authhub_core::config::{PolicyRule, RbacConfig};
use authhub_core::error::AppError;
use authhub_core::result::AppResult;

use super::policy::{Policy, parse_policy_csv};

/// Answers `(role, path, method)` questions against the loaded policies.
///
/// Anything not explicitly allowed is denied.
#[derive(Debug, Default)]
pub struct RbacEnforcer {
    policies: RwLock<Vec<Policy>>,
}

impl RbacEnforcer {
    pub fn new(rules: &[PolicyRule]) -> Self {
        Self {
            policies: RwLock::new(rules.iter().map(Policy::from).collect()),
        }
    }

    /// Load inline rules, then the optional policy file.
    pub fn from_config(config: &RbacConfig) -> AppResult<Self> {
        let mut rules = config.rules.clone();
        if let Some(path) = &config.policy_file {
            let text = std::fs::read_to_string(path).map_err(|e| {
                AppError::configuration(format!("Failed to read policy file '{path}': {e}"))
            })?;
            rules.extend(parse_policy_csv(&text)?);
        }
        info!(policies = rules.len(), "RBAC policies loaded");
        Ok(Self::new(&rules))
    }

    /// Whether `role` may call `method` on `path`.
    pub fn enforce(&self, role: &str, path: &str, method: &str) -> AppResult<bool> {
        let allowed = self
            .read()?
            .iter()
            .any(|policy| policy.matches(role, path, method));
        debug!(role, path, method, allowed, "RBAC decision");
        Ok(allowed)
    }

    /// Add a rule. Returns `false` if it was already present.
    pub fn add_policy(&self, rule: &PolicyRule) -> AppResult<bool> {
        let policy = Policy::from(rule);
        let mut policies = self.write()?;
        if policies.contains(&policy) {
            return Ok(false);
        }
        policies.push(policy);
        Ok(true)
    }

    /// Remove a rule. Returns `false` if it was not present.
    pub fn remove_policy(&self, rule: &PolicyRule) -> AppResult<bool> {
        let policy = Policy::from(rule);
        let mut policies = self.write()?;
        let before = policies.len();
        policies.retain(|p| *p != policy);
        Ok(policies.len() != before)
    }

    /// Snapshot of the current rules.
    pub fn policies(&self) -> AppResult<Vec<PolicyRule>> {
        Ok(self.read()?.iter().map(PolicyRule::from).collect())
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<Policy>>> {
        self.policies
            .read()
            .map_err(|_| AppError::internal("RBAC policy lock poisoned"))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Policy>>> {
        self.policies
            .write()
            .map_err(|_| AppError::internal("RBAC policy lock poisoned"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_default_config_grants_admin_routes() {
        let enforcer = RbacEnforcer::from_config(&RbacConfig::default()).unwrap();
        assert!(enforcer.enforce("admin", "/admin/register", "POST").unwrap());
        assert!(enforcer.enforce("admin", "/admin/users", "GET").unwrap());
        assert!(!enforcer.enforce("user", "/admin/users", "GET").unwrap());
        assert!(!enforcer.enforce("", "/admin/users", "GET").unwrap());
    }

    #[test]
    fn test_add_and_remove() {
        let enforcer = RbacEnforcer::default();
        let rule = PolicyRule::new("user", "/reports/*", "GET");

        assert!(!enforcer.enforce("user", "/reports/2024", "GET").unwrap());
        assert!(enforcer.add_policy(&rule).unwrap());
        assert!(!enforcer.add_policy(&rule).unwrap());
        assert!(enforcer.enforce("user", "/reports/2024", "GET").unwrap());

        assert!(enforcer.remove_policy(&rule).unwrap());
        assert!(!enforcer.enforce("user", "/reports/2024", "GET").unwrap());
        assert!(enforcer.policies().unwrap().is_empty());
    }

    #[test]
    fn test_poisoned_lock_is_internal_error() {
        let enforcer = Arc::new(RbacEnforcer::default());
        let clone = Arc::clone(&enforcer);
        let _ = std::thread::spawn(move || {
            let _guard = clone.policies.write().unwrap();
            panic!("poison");
        })
        .join();

        let err = enforcer.enforce("admin", "/admin/users", "GET").unwrap_err();
        assert_eq!(err.kind, authhub_core::error::ErrorKind::Internal);
    }

    #[test]
    fn test_missing_policy_file() {
        let config = RbacConfig {
            policy_file: Some("/nonexistent/policy.csv".into()),
            ..Default::default()
        };
        assert!(RbacEnforcer::from_config(&config).is_err());
    }
}
