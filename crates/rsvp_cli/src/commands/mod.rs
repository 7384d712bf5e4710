//! Subcommand implementations.

pub mod admin;
pub mod submit;

use crate::gate::AuthError;
use rsvp_core::db::DbError;
use rsvp_core::{AggregatorError, IntakeError, RsvpValidationError, StoreError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Exit code for rejected guest submissions.
pub const EXIT_REJECTED: i32 = 2;
/// Exit code for admin commands refused by the gate.
pub const EXIT_UNAUTHORIZED: i32 = 3;
/// Exit code for infrastructure failures.
pub const EXIT_FAILED: i32 = 1;

/// Outcome of a failed command.
#[derive(Debug)]
pub enum CommandError {
    /// Guest-correctable submission problem.
    Rejected(RsvpValidationError),
    /// Admin gate refused the caller.
    Unauthorized(AuthError),
    /// Store, export or I/O failure.
    Failed(Box<dyn Error + Send + Sync + 'static>),
}

impl CommandError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Rejected(_) => EXIT_REJECTED,
            Self::Unauthorized(_) => EXIT_UNAUTHORIZED,
            Self::Failed(_) => EXIT_FAILED,
        }
    }
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{}: {}", err.code(), err.message()),
            Self::Unauthorized(err) => write!(f, "unauthorized: {err}"),
            Self::Failed(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::Unauthorized(err) => Some(err),
            Self::Failed(err) => Some(err.as_ref()),
        }
    }
}

impl From<AuthError> for CommandError {
    fn from(value: AuthError) -> Self {
        Self::Unauthorized(value)
    }
}

impl From<IntakeError> for CommandError {
    fn from(value: IntakeError) -> Self {
        match value {
            IntakeError::Validation(err) => Self::Rejected(err),
            IntakeError::Store(err) => Self::Failed(Box::new(err)),
        }
    }
}

impl From<AggregatorError> for CommandError {
    fn from(value: AggregatorError) -> Self {
        Self::Failed(Box::new(value))
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Failed(Box::new(value))
    }
}

impl From<DbError> for CommandError {
    fn from(value: DbError) -> Self {
        Self::Failed(Box::new(value))
    }
}

impl From<std::io::Error> for CommandError {
    fn from(value: std::io::Error) -> Self {
        Self::Failed(Box::new(value))
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(value: serde_json::Error) -> Self {
        Self::Failed(Box::new(value))
    }
}
