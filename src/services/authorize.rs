use crate::auth::RequestToken;
use crate::domain::DomainSpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(String),
}

/// Authorization strategy, checked before every service operation.
///
/// The default is [`AllowAll`]: any authenticated caller may proceed. A real
/// role model plugs in here without touching the service call sites, e.g.
///
/// ```ignore
/// impl Authorizer for RoleChecks {
///     fn check(&self, token: &RequestToken, operation: Operation, domain: &DomainSpec) -> Decision {
///         match operation {
///             Operation::Update if !token.roles.iter().any(|r| r == "admin") => {
///                 Decision::Deny(format!("admin role required to update {} documents", domain.slug))
///             }
///             Operation::Create
///                 if !token.roles.iter().any(|r| r == "staff" || r == "admin") =>
///             {
///                 Decision::Deny(format!("staff or admin role required to create {} documents", domain.slug))
///             }
///             _ => Decision::Allow,
///         }
///     }
/// }
/// ```
pub trait Authorizer: Send + Sync {
    fn check(&self, token: &RequestToken, operation: Operation, domain: &DomainSpec) -> Decision;
}

/// Placeholder policy: authentication is the only requirement.
pub struct AllowAll;

impl Authorizer for AllowAll {
    fn check(&self, _token: &RequestToken, _operation: Operation, _domain: &DomainSpec) -> Decision {
        Decision::Allow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain;

    #[test]
    fn allow_all_permits_every_operation() {
        let token = RequestToken { user_id: "u1".into(), roles: vec![] };
        let spec = domain::find("organization").unwrap();
        for op in [Operation::Read, Operation::Create, Operation::Update] {
            assert_eq!(AllowAll.check(&token, op, spec), Decision::Allow);
        }
    }
}
