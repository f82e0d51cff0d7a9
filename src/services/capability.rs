use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while resolving a capability
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

/// Role token resolved once per form session.
///
/// Rendering logic branches on this value instead of re-checking roles at
/// every field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Admin,
    Member,
}

#[derive(Debug, Deserialize)]
struct Claims {
    #[allow(dead_code)]
    sub: String,
    #[serde(default)]
    role: Option<String>,
    #[allow(dead_code)]
    exp: usize,
}

/// Resolve a capability from the auth collaborator's HS256 JWT.
///
/// Any role other than "admin" (or a missing role claim) maps to Member.
pub fn resolve_capability(token: &str, secret: &str) -> Result<Capability, AuthError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?;

    Ok(match data.claims.role.as_deref() {
        Some("admin") => Capability::Admin,
        _ => Capability::Member,
    })
}
