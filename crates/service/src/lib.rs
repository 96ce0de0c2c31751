//! Service layer: the business rules of the social graph on top of `models`.
//! - Repository traits per resource, with SeaORM and in-memory implementations.
//! - Every mutating operation runs the ownership check before touching the store.
//! - One error taxonomy (`errors::ServiceError`) shared by all services.

pub mod errors;
pub mod auth;
pub mod posts;
pub mod profiles;
#[cfg(test)]
pub mod test_support;
