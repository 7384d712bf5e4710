//! Admin credential gate.
//!
//! # Responsibility
//! - Decide whether a caller may reach aggregator commands.
//! - Hand out an `AdminAccess` proof that admin commands require.
//!
//! # Invariants
//! - An unset or blank configured secret denies every caller.
//! - Credential comparison does not short-circuit on the first mismatch.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Admin authorization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No admin secret is configured.
    NotConfigured,
    /// Caller presented no credential.
    MissingCredential,
    /// Caller presented a credential that does not match.
    InvalidCredential,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotConfigured => write!(f, "admin access is not configured"),
            Self::MissingCredential => write!(f, "admin credential required"),
            Self::InvalidCredential => write!(f, "invalid admin credential"),
        }
    }
}

impl Error for AuthError {}

/// Proof that the admin gate was passed.
#[derive(Debug)]
pub struct AdminAccess {
    _private: (),
}

/// Shared-secret check in front of every admin command.
pub struct AdminGate {
    secret: Option<String>,
}

impl AdminGate {
    pub fn new(secret: Option<String>) -> Self {
        let secret = secret.filter(|value| !value.trim().is_empty());
        Self { secret }
    }

    /// Checks `credential` against the configured secret.
    pub fn authorize(&self, credential: Option<&str>) -> Result<AdminAccess, AuthError> {
        let secret = self.secret.as_deref().ok_or(AuthError::NotConfigured)?;
        let credential = credential
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingCredential)?;

        if !constant_time_eq(secret.as_bytes(), credential.as_bytes()) {
            return Err(AuthError::InvalidCredential);
        }

        Ok(AdminAccess { _private: () })
    }
}

fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    if left.len() != right.len() {
        return false;
    }
    left.iter()
        .zip(right)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}

#[cfg(test)]
mod tests {
    use super::{constant_time_eq, AdminGate, AuthError};

    #[test]
    fn unconfigured_gate_denies_everyone() {
        let gate = AdminGate::new(None);
        assert_eq!(
            gate.authorize(Some("x")).unwrap_err(),
            AuthError::NotConfigured
        );

        let blank = AdminGate::new(Some("   ".to_string()));
        assert_eq!(
            blank.authorize(Some("   ")).unwrap_err(),
            AuthError::NotConfigured
        );
    }

    #[test]
    fn missing_and_wrong_credentials_are_denied() {
        let gate = AdminGate::new(Some("marigold".to_string()));
        assert_eq!(
            gate.authorize(None).unwrap_err(),
            AuthError::MissingCredential
        );
        assert_eq!(
            gate.authorize(Some("")).unwrap_err(),
            AuthError::MissingCredential
        );
        assert_eq!(
            gate.authorize(Some("marigolds")).unwrap_err(),
            AuthError::InvalidCredential
        );
        assert_eq!(
            gate.authorize(Some("Marigold")).unwrap_err(),
            AuthError::InvalidCredential
        );
    }

    #[test]
    fn matching_credential_is_admitted() {
        let gate = AdminGate::new(Some("marigold".to_string()));
        assert!(gate.authorize(Some("marigold")).is_ok());
    }

    #[test]
    fn constant_time_eq_compares_full_length() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
    }
}
