//! Authentication ports.

use uuid::Uuid;

use crate::domain::Role;

/// Claims carried by a session token.
///
/// A snapshot of the identity at issuance time. Verification is stateless,
/// so a role change or account deletion does not invalidate outstanding
/// tokens before expiry.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub role: Role,
    pub exp: i64,
}

/// Token service trait for issuing and verifying session tokens.
pub trait TokenService: Send + Sync {
    /// Issue a signed token embedding the identity snapshot.
    fn issue_token(&self, user_id: Uuid, username: &str, role: Role)
    -> Result<String, AuthError>;

    /// Verify signature and expiry, and decode the claims.
    fn verify_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Token lifetime in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
