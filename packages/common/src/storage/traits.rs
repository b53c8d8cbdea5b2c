use async_trait::async_trait;

use super::error::StorageError;

/// Flat object storage for uploaded images, addressed by object name.
///
/// Names are single path components; implementations reject names that
/// contain separators or traversal patterns.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store bytes under the given name, replacing any existing object.
    async fn put(&self, name: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Retrieve all bytes for an object.
    async fn get(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether an object exists.
    async fn exists(&self, name: &str) -> Result<bool, StorageError>;

    /// Delete an object.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, name: &str) -> Result<bool, StorageError>;
}
