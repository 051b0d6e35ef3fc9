//! # trainhub-core
//!
//! Core crate for TrainHub. Contains configuration schemas, the unified
//! error system, and the storage provider trait implemented by
//! `trainhub-storage`.
//!
//! This crate has **no** internal dependencies on other TrainHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
