use super::{ErrorCode, JanitorError};
use std::path::Path;

/// Extension trait for convenient error conversion
pub trait ErrorExt<T> {
    /// Convert to a configuration error with a specific code
    fn to_config_error(self, code: u16, message: impl Into<String>) -> Result<T, JanitorError>;

    /// Convert to a storage error tied to a state document path
    fn to_storage_error(self, path: &Path, message: impl Into<String>)
        -> Result<T, JanitorError>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    fn to_config_error(self, code: u16, message: impl Into<String>) -> Result<T, JanitorError> {
        self.map_err(|e| JanitorError::config_with_code(code, message).with_source(e))
    }

    fn to_storage_error(
        self,
        path: &Path,
        message: impl Into<String>,
    ) -> Result<T, JanitorError> {
        self.map_err(|e| {
            JanitorError::storage_with_code(
                ErrorCode::STORAGE_IO_ERROR,
                message,
                Some(path.to_path_buf()),
            )
            .with_source(e)
        })
    }
}
