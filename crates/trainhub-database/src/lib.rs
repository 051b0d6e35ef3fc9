//! # trainhub-database
//!
//! The [`DocumentStore`] abstraction the upload workflow writes through,
//! with a PostgreSQL implementation (connection pool, migrations,
//! repositories) and an in-memory implementation for development and
//! tests. [`StoreManager`] picks one from configuration.

pub mod connection;
#[cfg(feature = "memory")]
pub mod memory;
pub mod migration;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod provider;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use provider::StoreManager;
pub use store::{DocumentStore, StoreTransaction};
