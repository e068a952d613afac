//! Error types for profile-lens.
//!
//! The projection core is total over its input domain and never returns
//! errors. Failures only come from the edges: decoding a profile document,
//! writing an export, or talking to the profiling backend. All of them are
//! represented by [`ProfileError`].

use thiserror::Error;

/// The main error type for profile-lens.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// A profile document or export could not be (de)serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(String),

    /// Error from I/O operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The profiling backend answered with an error body instead of a profile.
    #[error("Profiling backend reported an error: {message}")]
    Backend {
        /// Message taken verbatim from the backend's `error` field
        message: String,
    },

    /// The request never produced a response (connection refused, timeout, ...).
    #[error("Network error: {message}")]
    Network { message: String },

    /// The backend responded with a non-success status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Error related to configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Generic internal error for unexpected conditions.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ProfileError>`.
pub type Result<T> = std::result::Result<T, ProfileError>;

impl ProfileError {
    /// Creates a backend error from the message the backend sent back.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Creates a network error with the given message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Returns true if retrying the same upload could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProfileError::Network { .. } => true,
            ProfileError::Server { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<csv::Error> for ProfileError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorContext<T> {
    /// Adds context to an error.
    fn context(self, msg: &str) -> Result<T>;

    /// Adds context with a lazy message.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<ProfileError>,
{
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            match base_error {
                ProfileError::Internal(inner) => ProfileError::Internal(format!("{msg}: {inner}")),
                other => ProfileError::Internal(format!("{msg}: {other}")),
            }
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let msg = f();
            let base_error = e.into();
            match base_error {
                ProfileError::Internal(inner) => ProfileError::Internal(format!("{msg}: {inner}")),
                other => ProfileError::Internal(format!("{msg}: {other}")),
            }
        })
    }
}
