use std::fmt::Debug;

use actix_web::error::InternalError;
use actix_web::web;
use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;
use secrecy::Secret;
use serde::Deserialize;

use crate::authentication::validate_credentials;
use crate::authentication::AdminEmail;
use crate::authentication::AuthError;
use crate::authentication::Credentials;
use crate::identity::IdentityClient;
use crate::session_state::TypedSession;
use crate::utils::error_chain_fmt;
use crate::utils::redirect;

#[derive(Deserialize)]
pub struct LoginFormData {
    email: String,
    password: Secret<String>,
}

/// The `Display` of each variant is what the login page shows
#[derive(thiserror::Error)]
pub enum LoginError {
    #[error("Invalid email or password.")]
    InvalidCredentials(#[source] anyhow::Error),
    #[error("Access Denied: Only authorised admins allowed.")]
    NotAdmin,
    #[error("Something went wrong while signing in. Please try again later.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for LoginError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl From<AuthError> for LoginError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials(e) => Self::InvalidCredentials(e),
            AuthError::NotAdmin(_) => Self::NotAdmin,
            AuthError::UnexpectedError(e) => Self::UnexpectedError(e),
        }
    }
}

fn login_redirect(err: LoginError) -> InternalError<LoginError> {
    FlashMessage::error(err.to_string()).send();
    InternalError::from_response(err, redirect("/admin/login"))
}

/// `POST /admin/login`
///
/// On success the session id is rotated, the `AdminSession` stored, and the
/// client sent to `/admin/dashboard`; otherwise back to `/admin/login` with
/// the reason as a flash message.
#[tracing::instrument(
    name = "Admin login",
    skip(form, identity, admin_email, session),
    fields(
        email = %form.email,
        user_id = tracing::field::Empty,
    )
)]
pub async fn login(
    form: web::Form<LoginFormData>,
    identity: web::Data<IdentityClient>,
    admin_email: web::Data<AdminEmail>,
    session: TypedSession,
) -> Result<HttpResponse, InternalError<LoginError>> {
    let form = form.into_inner();
    let creds = Credentials {
        email: form.email.trim().to_string(),
        password: form.password,
    };

    let admin = validate_credentials(creds, &identity, &admin_email)
        .await
        .map_err(|e| login_redirect(e.into()))?;
    tracing::Span::current().record("user_id", tracing::field::display(&admin.user_id));

    // new id on every privilege change, against session fixation
    session.renew();
    session
        .insert_admin(&admin)
        .map_err(|e| login_redirect(LoginError::UnexpectedError(e.into())))?;

    Ok(redirect("/admin/dashboard"))
}
