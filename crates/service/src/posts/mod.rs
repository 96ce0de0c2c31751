//! Posts with their like set and comment list.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::PostService;
