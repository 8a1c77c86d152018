//! Postgres Provisioner API
//!
//! A Rust-based microservice that provisions isolated Postgres databases and
//! their owning roles for tenant applications, following Clean/Hexagonal
//! Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
