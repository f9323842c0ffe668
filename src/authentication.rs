// admin access is decided in two places: at login (`validate_credentials`),
// where the identity provider vouches for an email address, and on every
// `/admin/*` request (`reject_non_admin_users`), where the session's email is
// compared against the allow-list again

mod middleware;

use std::fmt::Debug;

use secrecy::Secret;

pub use middleware::reject_non_admin_users;

use crate::identity::IdentityClient;
use crate::identity::IdentityError;
use crate::session_state::AdminSession;
use crate::utils::error_chain_fmt;

pub struct Credentials {
    pub email: String,
    pub password: Secret<String>,
}

/// The single address allowed into the admin panel. Comparison ignores case
/// and surrounding whitespace.
#[derive(Clone, Debug)]
pub struct AdminEmail(String);

impl AdminEmail {
    pub fn new(email: &str) -> Self { Self(email.trim().to_lowercase()) }

    pub fn matches(
        &self,
        email: &str,
    ) -> bool {
        !self.0.is_empty() && email.trim().to_lowercase() == self.0
    }
}

#[derive(thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials(#[source] anyhow::Error),
    /// Valid account, but not the admin
    #[error("Access Denied: Only authorised admins allowed.")]
    NotAdmin(String),
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for AuthError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Sign in at the identity provider, then check the returned identity
/// against the allow-list.
///
/// A non-admin sign-in is ended at the provider straight away; if that fails
/// there is nothing more to do about it than log.
#[tracing::instrument(
    name = "Validating admin credentials",
    skip(creds, identity, admin_email),
    fields(email = %creds.email)
)]
pub async fn validate_credentials(
    creds: Credentials,
    identity: &IdentityClient,
    admin_email: &AdminEmail,
) -> Result<AdminSession, AuthError> {
    let user = identity
        .sign_in(&creds.email, creds.password)
        .await
        .map_err(|e| match e {
            IdentityError::Rejected(msg) => AuthError::InvalidCredentials(anyhow::anyhow!(msg)),
            IdentityError::Unexpected(e) => AuthError::UnexpectedError(e),
        })?;

    if !admin_email.matches(&user.email) {
        if let Err(e) = identity.sign_out(&user.id_token).await {
            tracing::warn!(
                error.cause_chain = ?e,
                error.message = %e,
                "Failed to end non-admin provider session",
            );
        }
        return Err(AuthError::NotAdmin(user.email));
    }

    Ok(AdminSession::from(user))
}
