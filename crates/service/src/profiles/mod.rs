//! Per-user profiles with experience and education history.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::ProfileService;
