//! Role-based access control over `(role, path, method)` triples.

pub mod enforcer;
pub mod policy;

pub use enforcer::RbacEnforcer;
pub use policy::{Policy, parse_policy_csv};
