use std::path::PathBuf;
use thiserror::Error;

pub mod codes;
pub mod helpers;

pub use codes::ErrorCode;
pub use helpers::ErrorExt;

/// The error type for every fatal folder-janitor failure.
///
/// Per-file deletion failures, traversal races and directory removal failures
/// are not represented here: they are counted by the run and never abort it.
#[derive(Error, Debug)]
pub enum JanitorError {
    #[error("[E{code:04}] Configuration error: {message}")]
    Config {
        code: u16,
        message: String,
        job: Option<String>,
        field: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("[E{code:04}] Config file not found: {}", .path.display())]
    ConfigNotFound { code: u16, path: PathBuf },

    #[error("[E{code:04}] Storage error: {message}")]
    Storage {
        code: u16,
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl JanitorError {
    /// Create a configuration error with specific code
    pub fn config_with_code(code: u16, message: impl Into<String>) -> Self {
        Self::Config {
            code,
            message: message.into(),
            job: None,
            field: None,
            source: None,
        }
    }

    /// Create a configuration error pinned to a job and one of its fields
    pub fn invalid_job_field(
        code: u16,
        job: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let job = job.into();
        let field = field.into();
        Self::Config {
            code,
            message: format!("Config entry \"{}\": \"{}\" {}", job, field, message.into()),
            job: Some(job),
            field: Some(field),
            source: None,
        }
    }

    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Self::ConfigNotFound {
            code: ErrorCode::CONFIG_NOT_FOUND,
            path: path.into(),
        }
    }

    /// Create a storage error with specific code and path
    pub fn storage_with_code(code: u16, message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::Storage {
            code,
            message: message.into(),
            path,
            source: None,
        }
    }

    /// Add a source error to this error
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        match &mut self {
            Self::Config { source: src, .. } | Self::Storage { source: src, .. } => {
                *src = Some(source.into());
            }
            Self::ConfigNotFound { .. } => {}
        }
        self
    }

    /// Process exit code for this error.
    ///
    /// Configuration problems share code 2 with a missing config file; every
    /// state failure exits 1, the same as a run with deletion failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config { .. } | Self::ConfigNotFound { .. } => 2,
            Self::Storage { .. } => 1,
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            Self::Config { code, .. }
            | Self::ConfigNotFound { code, .. }
            | Self::Storage { code, .. } => *code,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message, .. } => message.clone(),
            Self::ConfigNotFound { path, .. } => {
                format!("Config file not found: {}", path.display())
            }
            Self::Storage { message, path, .. } => match path {
                Some(p) => format!("State error at {}: {}", p.display(), message),
                None => format!("State error: {}", message),
            },
        }
    }

    /// Get a developer-friendly error message with full chain
    pub fn developer_message(&self) -> String {
        let mut out = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\n  caused by: {}", cause));
            source = cause.source();
        }
        out
    }
}

/// Type alias for Results using JanitorError
pub type Result<T> = std::result::Result<T, JanitorError>;

impl From<serde_json::Error> for JanitorError {
    fn from(err: serde_json::Error) -> Self {
        JanitorError::config_with_code(ErrorCode::CONFIG_INVALID_JSON, "Invalid JSON syntax")
            .with_source(err)
    }
}
