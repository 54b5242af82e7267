//! Authentication service.
//!
//! Passwords are hashed with bcrypt; sessions are stateless HS256 bearer
//! tokens valid for seven days.

mod error;

pub use error::AuthError;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use longbox_core::UserId;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Token lifetime in seconds (7 days).
const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims carried by a Longbox bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID, stringified per JWT convention.
    pub sub: String,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// The user ID this token was issued to.
    ///
    /// Returns `None` if the subject is not a valid integer (a token we
    /// never issued; signature verification makes this unreachable in
    /// practice).
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse::<i32>().ok().map(UserId::new)
    }
}

/// Authentication service.
///
/// Handles signup, login, and bearer-token issuance.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    jwt_secret: &'a SecretString,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, jwt_secret: &'a SecretString) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_secret,
        }
    }

    /// Register a new user and issue a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::EmailTaken` if the email is already registered.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<(User, String), AuthError> {
        if self.users.email_exists(email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

        let user = self
            .users
            .create(email, &password_hash, name)
            .await
            .map_err(|e| match e {
                // Insert raced with another signup for the same email
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Log in with email and password and issue a token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for unknown email or wrong
    /// password alike.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let (user, password_hash) = self
            .users
            .get_password_hash(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !bcrypt::verify(password, &password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Issue a signed bearer token bound to (id, email).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if encoding fails.
    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.expose_secret().as_bytes()),
        )?;

        Ok(token)
    }
}

/// Verify a bearer token's signature and expiry.
///
/// Standalone so the extractor can verify without a database pool.
///
/// # Errors
///
/// Returns `jsonwebtoken::errors::Error` on signature or expiry failure.
pub fn verify_token(
    token: &str,
    jwt_secret: &SecretString,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.expose_secret().as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}
