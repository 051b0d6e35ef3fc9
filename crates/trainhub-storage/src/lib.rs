//! # trainhub-storage
//!
//! Storage provider implementations for TrainHub. Ingested files are
//! written to the local private files tree.

pub mod providers;

pub use providers::LocalStorageProvider;
