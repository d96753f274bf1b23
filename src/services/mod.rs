pub mod authorize;
pub mod domain_service;

pub use authorize::{AllowAll, Authorizer, Decision, Operation};
pub use domain_service::DomainService;
