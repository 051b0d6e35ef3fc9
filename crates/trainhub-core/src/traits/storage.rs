//! Storage provider trait for the private files tree.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for file storage backends.
///
/// Paths are relative to the provider root and use `/` as separator,
/// e.g. `Home/training_data/P1/ok/P1ok1_a1b2c3.png`. The only
/// implementation today is the local filesystem provider in
/// `trainhub-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Read a file into memory as a complete byte vector.
    async fn read_bytes(&self, path: &str) -> AppResult<Bytes>;

    /// Write bytes to a file at the given path, replacing any existing file.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Delete a file at the given path. Missing files are not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a file or directory exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Size in bytes of the file stored at `path`.
    async fn size(&self, path: &str) -> AppResult<u64>;

    /// Create a directory (and any missing parents). Existing directories
    /// are left untouched.
    async fn create_dir(&self, path: &str) -> AppResult<()>;
}
