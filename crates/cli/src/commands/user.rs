//! User provisioning command.

use longbox_server::db::{RepositoryError, UserRepository};

use super::ConnectError;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("a user with this email already exists")]
    EmailTaken,

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for UserError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Conflict(_) => Self::EmailTaken,
            other => Self::Repository(other),
        }
    }
}

/// Create a user with a bcrypt-hashed password.
///
/// Uses the same cost factor as the signup endpoint so both paths
/// produce interchangeable hashes.
#[allow(clippy::print_stdout)]
pub async fn create(email: &str, password: &str, name: Option<&str>) -> Result<(), UserError> {
    let pool = super::connect().await?;

    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let user = UserRepository::new(&pool).create(email, &hash, name).await?;

    tracing::info!(id = %user.id, email = %user.email, "User created");
    println!("Created user {} ({})", user.email, user.id);

    Ok(())
}
