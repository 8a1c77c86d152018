//! Database Use Cases
//!
//! Provisioning, deprovisioning and health checking of tenant databases.

mod create_database;
mod drop_database;
mod ping;

#[cfg(test)]
pub(crate) mod mock;

pub use create_database::CreateDatabaseUseCase;
pub use drop_database::DropDatabaseUseCase;
pub use ping::PingUseCase;
