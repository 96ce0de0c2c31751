//! Auth module: user registry, credentials, avatars and the access guard.
//!
//! Registration and login live in [`service::UserRegistry`]; every mutating profile/post
//! operation goes through [`guard::AccessGuard`] first.

pub mod avatar;
pub mod credentials;
pub mod domain;
pub mod guard;
pub mod repository;
pub mod service;
pub mod repo;

pub use guard::{authorize_owner, AccessGuard};
pub use service::UserRegistry;
