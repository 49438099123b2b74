//! The kernel's single error type.

use thiserror::Error;

/// Result alias used throughout the kernel.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Failure raised while constructing or validating a body.
///
/// Construction is all-or-nothing: when any of these is returned, no partially
/// built body escapes to the caller.
#[derive(Debug, Error)]
pub enum TopologyError {
    /// Rejected before any topology is created (bad distance, direction,
    /// missing sketch, malformed curve data).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The sketch does not form a closed loop.
    #[error("open profile: {0}")]
    OpenProfile(String),

    /// The finished body breaks a structural invariant.
    #[error("topology violation: {0}")]
    Violation(String),

    /// Settings or sketch JSON could not be parsed.
    #[error("malformed document: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Coarse classification of a [`TopologyError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    InputValidation,
    OpenProfile,
    TopologyViolation,
    Settings,
}

impl TopologyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TopologyError::InvalidInput(_) => ErrorKind::InputValidation,
            TopologyError::OpenProfile(_) => ErrorKind::OpenProfile,
            TopologyError::Violation(_) => ErrorKind::TopologyViolation,
            TopologyError::Settings(_) => ErrorKind::Settings,
        }
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        TopologyError::InvalidInput(msg.into())
    }

    pub(crate) fn violation(msg: impl Into<String>) -> Self {
        TopologyError::Violation(msg.into())
    }
}
