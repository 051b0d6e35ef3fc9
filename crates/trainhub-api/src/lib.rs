//! # trainhub-api
//!
//! HTTP API layer for TrainHub built on Axum.
//!
//! Exposes the training-data upload method and a health endpoint, with
//! CORS, compression, request logging and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
