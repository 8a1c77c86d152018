//! Database Admin Adapters

mod postgres;

pub use postgres::PostgresDatabaseAdmin;
