//! HTTP Handlers

pub mod databases;
pub mod health;
