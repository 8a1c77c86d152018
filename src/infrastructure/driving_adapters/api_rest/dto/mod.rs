//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod database;

pub use database::{ConnectionEnvDto, DropDatabaseParams, ProvisionedDatabaseResponseDto};
